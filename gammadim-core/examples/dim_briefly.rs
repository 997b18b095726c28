//! Example: dim the display for a few seconds, then restore it.
//!
//! Run with: `cargo run --example dim_briefly`

use gammadim_core::{GammaController, GammaError, SystemGammaDevice};
use std::time::Duration;

fn main() -> Result<(), GammaError> {
    // Initialize logging (optional)
    env_logger::init();

    // Open the display
    let mut controller = GammaController::new(SystemGammaDevice::open()?);

    // Dim to 50%
    println!("Dimming to 50% for 3 seconds...");
    if let Err(e) = controller.apply(0.5) {
        eprintln!("Error dimming: {}", e);
    }

    std::thread::sleep(Duration::from_secs(3));

    // Always put the original calibration back
    controller.restore()?;
    println!("Restored original gamma ramp");

    Ok(())
}
