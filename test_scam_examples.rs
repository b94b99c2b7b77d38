#![allow(clippy::uninlined_format_args)]

use scam_radar::classifier::{ScamClassifier, SAMPLE_MESSAGES};
use scam_radar::config::Config;
use scam_radar::LinearModel;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing the sample messages against the demo model...");

    let config = Config::default();
    let model = LinearModel::load_from_file(&config.model_path)?;
    let classifier = ScamClassifier::new(&config, Box::new(model));

    for (i, message) in SAMPLE_MESSAGES.iter().enumerate() {
        println!();
        println!("Message {}: {}", i + 1, message);

        match classifier.analyze(message)? {
            Some(analysis) => {
                println!("  Case: {}", analysis.case_info.case);
                println!("  Shortener: {}", analysis.case_info.has_shortener);
                println!(
                    "  Features: money={} url={} phone={}",
                    analysis.features.has_money,
                    analysis.features.has_url,
                    analysis.features.has_phone
                );
                println!(
                    "  Probability: base={:.4} adjusted={:.4}",
                    analysis.score.base_probability, analysis.score.adjusted_probability
                );
                println!("  Label: {}", analysis.score.label);
                println!("  Explanation: {}", analysis.explanation);
            }
            None => println!("  (blank message skipped)"),
        }
    }

    Ok(())
}
