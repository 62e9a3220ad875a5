//! Range, tick and scale commands. These never touch a data source.

use chrono::NaiveDate;
use clap::Args;
use timelines_core::{Config, Ruler, Scale, TickEmphasis};

use super::center_or_today;

#[derive(Args)]
pub struct ViewArgs {
    /// Center date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub center: Option<NaiveDate>,
    /// Zoom scale (default: view.default_scale from config)
    #[arg(long)]
    pub scale: Option<Scale>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ViewArgs {
    pub fn resolve(&self) -> (NaiveDate, Scale) {
        let scale = self
            .scale
            .unwrap_or_else(|| Config::load_or_default().view.default_scale);
        (center_or_today(self.center), scale)
    }
}

pub fn run_range(args: ViewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (center, scale) = args.resolve();
    let ruler = Ruler::build(center, scale);

    if args.json {
        let json = serde_json::json!({
            "center": center,
            "scale": scale,
            "start": ruler.range.start(),
            "end": ruler.range.end(),
            "label": ruler.center.label,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{} .. {}", ruler.range.start(), ruler.range.end());
        println!("Center: {} ({scale})", ruler.center.label);
        if let Some((first, middle, last)) = ruler.summary_labels() {
            match middle {
                Some(middle) => println!("Ruler: {first} | {middle} | {last}"),
                None => println!("Ruler: {first} | {last}"),
            }
        }
    }
    Ok(())
}

pub fn run_ticks(args: ViewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (center, scale) = args.resolve();
    let ruler = Ruler::build(center, scale);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ruler)?);
        return Ok(());
    }

    for (i, tick) in ruler.ticks.iter().enumerate() {
        let mark = match ruler.emphasis(i) {
            Some(TickEmphasis::Current) => '>',
            Some(TickEmphasis::Primary) => '#',
            Some(TickEmphasis::Secondary) => '+',
            _ => ' ',
        };
        match &tick.sub_label {
            Some(sub) => println!("{mark} {}  {}  {sub}", tick.date, tick.label),
            None => println!("{mark} {}  {}", tick.date, tick.label),
        }
    }
    Ok(())
}

pub fn run_scales() -> Result<(), Box<dyn std::error::Error>> {
    for scale in Scale::ALL {
        println!("{scale}");
    }
    Ok(())
}
