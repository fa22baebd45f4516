use crate::error::Result;
use crate::models::Policy;
use crate::settings::{save_settings, Settings};

/// Write a fresh settings file from defaults plus the given flags.
pub fn run(model: Option<String>, threshold: Option<f64>, no_ml: bool) -> Result<()> {
    let mut settings = Settings::default();
    if let Some(path) = model {
        settings.model_path = path;
    }
    if let Some(t) = threshold {
        // Same validation as a per-run policy
        Policy::new(true, t)?;
        settings.threshold = t;
    }
    settings.use_ml = !no_ml;
    save_settings(&settings)?;

    println!("Settings saved");
    println!("  model_path: {}", if settings.model_path.is_empty() { "(none)" } else { &settings.model_path });
    println!("  use_ml:     {}", settings.use_ml);
    println!("  threshold:  {}", settings.threshold);
    Ok(())
}
