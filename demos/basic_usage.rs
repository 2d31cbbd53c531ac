//! Basic usage example for mediahandle
//!
//! This example acquires a capture stream from the in-memory platform,
//! toggles mute and pause, and binds the stream to an output element.

use mediahandle::{
    init_logging, AcquireOptions, CaptureStrategy, LoggingConfig, MediaError, MediaHandle,
    MockPlatform, OutputElement,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::debug())?;

    println!("🎥 Acquiring camera and microphone");
    let platform = MockPlatform::with_strategies(&[CaptureStrategy::Standard]);
    let mut handle = MediaHandle::acquire(&platform, None, AcquireOptions::default()).await?;

    handle.set_muted(true);
    handle.toggle_paused();
    println!(
        "📊 Handle state: {}",
        serde_json::to_string_pretty(&handle.state())?
    );

    let element = handle.attach(&platform, None)?;
    println!(
        "📺 Element playing: {}, element muted: {}",
        element.is_playing(),
        element.is_muted()
    );

    println!("🚫 Acquiring on a host without capture support");
    let unsupported = MockPlatform::unsupported();
    match MediaHandle::acquire(&unsupported, None, AcquireOptions::default()).await {
        Err(MediaError::UnsupportedPlatform { operation }) => {
            println!("   rejected as expected ({})", operation)
        }
        Err(e) => println!("   unexpected error: {}", e),
        Ok(_) => println!("   unexpectedly granted"),
    }

    Ok(())
}
