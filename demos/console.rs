use std::path::PathBuf;

use type2speak::engines::memory::MemoryEngine;
use type2speak::voice::{VoiceDescriptor, VoiceQuality};
use type2speak::{ControllerConfig, LanguageAvailability, LanguageId, PlaybackController};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Optional JSON config as the first argument.
    let config = match std::env::args().nth(1) {
        Some(path) => ControllerConfig::from_json_file(&PathBuf::from(path))?,
        None => ControllerConfig::default(),
    };

    let mut enhanced = VoiceDescriptor::new("en-us-x-enhanced-local", LanguageId::english_us());
    enhanced.quality = VoiceQuality::VERY_HIGH;
    let engine = MemoryEngine::with_voices(vec![
        enhanced,
        VoiceDescriptor::new("en-us-x-sfg-local", LanguageId::english_us()),
        VoiceDescriptor::new("en-gb-x-gbd-local", LanguageId::new("en", "GB")),
        VoiceDescriptor::new("hi-in-x-hia-local", LanguageId::new("hi", "IN")),
    ])
    .with_availability(LanguageId::new("ja", "JP"), LanguageAvailability::Unavailable);

    let mut controller = PlaybackController::new(engine, config);
    controller.subscribe(|state| {
        println!(
            "[{}] speaking={} supported={} text={:?}",
            state.selected_language, state.is_speaking, state.is_language_supported, state.text
        );
    });

    if !controller.initialize() {
        return Err("speech engine failed to start".into());
    }
    println!("Startup voice: {:?}", controller.engine().voice().map(|v| &v.name));

    for text in ["Hello from type2speak", "नमस्ते दुनिया", "こんにちは", "שלום"] {
        controller.update_text(text);
        println!("speak -> {:?}", controller.speak());
        controller.engine_mut().finish_current();
        controller.process_events();
    }

    controller.toggle_voice_gender(true);
    println!("Male voice: {:?}", controller.engine().voice().map(|v| &v.name));

    controller.update_text("Pausing restarts from the top.");
    controller.speak();
    controller.pause_speaking();
    println!("resume -> {:?}", controller.resume_speaking());
    controller.stop_speaking();

    println!("Languages:");
    for option in controller.available_languages() {
        println!("  {} {}", option.id, option.label);
    }

    Ok(())
}
