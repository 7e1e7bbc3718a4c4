use magick_exif::{Identify, IdentifyConfig, IdentifyError};
use std::path::Path;

const IMAGE_PATH: &str = "data/image.jpg";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=magick_exif=debug shows the command line and the parsed record
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| IMAGE_PATH.to_string());
    let identify = Identify::with_config(IdentifyConfig::from_env());

    match identify.extract_exif(Path::new(&path)) {
        Ok(exif) => {
            println!("{}", serde_json::to_string_pretty(&exif)?);
            Ok(())
        }
        Err(IdentifyError::IdentifyUnavailable { executable, .. }) => {
            eprintln!(
                "Could not start {}. Install ImageMagick or set MAGICK_EXIF_IDENTIFY.",
                executable.display()
            );
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}
