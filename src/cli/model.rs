use std::path::Path;

use crate::classifier::Classifier;
use crate::cli::resolve_model_path;
use crate::error::Result;
use crate::settings::load_settings;

pub fn info(model_file: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let path = resolve_model_path(model_file, &settings)?;
    let clf = Classifier::load(Path::new(&path))?;
    println!("Model artifact:   {path}");
    println!("Vocabulary size:  {}", clf.vocabulary_len());
    println!("Merchant weights: {}", clf.merchant_count());
    println!("SHA-256:          {}", clf.fingerprint());
    Ok(())
}
