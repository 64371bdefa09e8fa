//! Komplete Kontrol key color CLI tool
//!
//! Sets the colors every key of a Komplete Kontrol MK2 keyboard shows while
//! released and while pressed, using the vendor's 0xA4 HID report.

use std::fmt::{self, Debug, Display, Formatter};
use std::io::{self, Write};
use std::str::FromStr;

use clap::builder::PossibleValuesParser;
use clap::{crate_description, crate_name, crate_version, Arg, ArgMatches, Command, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::color::{Color, Hue, Intensity};
use crate::error::Error;
use crate::model::Generation;
use crate::session::DeviceSession;
use crate::transport::HidApiTransport;

mod color;
mod error;
mod model;
mod report;
mod session;
mod transport;

/// Key color config.
#[derive(Debug)]
struct Config {
    model: &'static str,
    up: Color,
    down: Color,
    interactive: bool,
}

impl Config {
    fn from_cli(matches: &ArgMatches) -> Self {
        let model = required_model(matches);
        let up = required_color(matches, "up");
        let down = required_color(matches, "down");

        let interactive = !matches.contains_id("model")
            || missing_color(matches, "up", up)
            || missing_color(matches, "down", down);

        Self { model, up, down, interactive }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} \\\n  --model {:?}", crate_name!(), self.model)?;

        for (name, color) in [("up", self.up), ("down", self.down)].iter() {
            write!(f, " \\\n  --{}-color {}", name, value_name(color.hue))?;

            // Intensity is meaningless for `Off`.
            if color.hue != Hue::Off {
                write!(f, " \\\n  --{}-intensity {}", name, value_name(color.intensity))?;
            }
        }

        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = cli();
    match cli.subcommand() {
        Some(("list", _)) => list(),
        Some(("reset", matches)) => reset(matches),
        _ => kkcolors(&cli),
    }
}

/// Print all supported models and colors.
fn list() {
    println!("Models:");
    for model in model::catalog() {
        println!(
            "  {} (mode {}, PID 0x{:04X}, {} keys, key offset {})",
            model.label, model.generation, model.product_id, model.keys, model.key_offset
        );
    }

    println!("\nColors:");
    for hue in Hue::value_variants() {
        println!("  {:<10} {:<12} 0x{:02X}", hue, value_name(*hue), hue.base());
    }

    let intensities: Vec<_> = Intensity::value_variants()
        .iter()
        .map(|intensity| format!("{} (+{})", value_name(*intensity), intensity.ordinal()))
        .collect();
    println!("\nIntensities: {}", intensities.join(", "));
}

/// Restore the default key colors.
fn reset(matches: &ArgMatches) {
    let model = required_model(matches);

    let result = open_session(model).map(|mut session| {
        session.close();
    });

    match result {
        Ok(()) => println!("\x1b[32mRestored default key colors.\x1b[0m"),
        Err(err) => eprintln!("\x1b[31mError:\x1b[0m {err}"),
    }
}

/// Update key up/down colors.
fn kkcolors(matches: &ArgMatches) {
    let config = Config::from_cli(matches);

    // Print CLI example to skip manual configuration.
    if config.interactive {
        println!("\x1b[32mConfiguration successful.\x1b[0m\n");
        println!("To reapply this config, you can run the following command:\n\n{}\n", config);
    }

    match write_config(&config) {
        Ok(status) => println!("\x1b[32m{status}\x1b[0m"),
        Err(err) => eprintln!("\x1b[31mError:\x1b[0m {err}"),
    }
}

/// Connect to a keyboard model, sending its init report.
fn open_session(model: &str) -> Result<DeviceSession<HidApiTransport>, Error> {
    let mut session = DeviceSession::new(HidApiTransport::new()?);

    session.select_model(model)?;
    println!("{}", session.connect()?);

    if session.model().map_or(false, |model| model.generation == Generation::Mk1) {
        println!("MK1 uses a different LED protocol, only the LED reset is supported.");
    }

    Ok(session)
}

/// Write a config to the HID bus.
fn write_config(config: &Config) -> Result<String, Error> {
    let mut session = open_session(config.model)?;

    let status = session.apply(config.up, config.down)?;
    session.close();

    Ok(status)
}

/// Get clap CLI parameters.
fn cli() -> ArgMatches {
    Command::new(crate_name!())
        .version(crate_version!())
        .author("Christian Duerr <contact@christianduerr.com>")
        .about(crate_description!())
        .subcommand(Command::new("list").about("List supported models and colors"))
        .subcommand(
            Command::new("reset")
                .about("Restore default key colors (off, red when pressed)")
                .arg(model_arg()),
        )
        .arg(model_arg())
        .arg(hue_arg("up-color", "Color of released keys"))
        .arg(intensity_arg("up-intensity", "Intensity of released keys"))
        .arg(hue_arg("down-color", "Color of pressed keys"))
        .arg(intensity_arg("down-intensity", "Intensity of pressed keys"))
        .get_matches()
}

fn model_arg() -> Arg {
    Arg::new("model")
        .help("Keyboard model")
        .long("model")
        .short('m')
        .value_parser(PossibleValuesParser::new(model::labels()))
}

fn hue_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .long(name)
        .value_name("COLOR")
        .value_parser(parse_name::<Hue>)
}

fn intensity_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .long(name)
        .value_name("INTENSITY")
        .value_parser(parse_name::<Intensity>)
}

/// Parse an enum from its CLI name or its display name.
fn parse_name<T>(input: &str) -> Result<T, String>
where
    T: ValueEnum + FromStr<Err = Error>,
{
    <T as ValueEnum>::from_str(input, true)
        .or_else(|_| input.parse::<T>())
        .map_err(|err| format!("{err}, see `{} list` for possible values", crate_name!()))
}

/// CLI name of an enum value.
fn value_name<T: ValueEnum>(value: T) -> String {
    value.to_possible_value().map(|value| value.get_name().to_owned()).unwrap_or_default()
}

/// Check if a color had to be read from STDIN.
fn missing_color(matches: &ArgMatches, state: &str, color: Color) -> bool {
    !matches.contains_id(&format!("{state}-color"))
        || (color.hue != Hue::Off && !matches.contains_id(&format!("{state}-intensity")))
}

/// Read the model option from CLI or prompt for STDIN if not present.
fn required_model(matches: &ArgMatches) -> &'static str {
    let selected = matches.get_one::<String>("model").and_then(|label| model::resolve(label).ok());
    if let Some(model) = selected {
        return model.label;
    }

    *required_choice("model", &model::labels())
}

/// Read a key color from CLI or prompt for STDIN if not present.
///
/// The intensity is only requested for hues other than `Off`.
fn required_color(matches: &ArgMatches, state: &str) -> Color {
    let hue = *required_enum::<Hue>(matches, &format!("{state}-color"));

    let intensity = match hue {
        Hue::Off => Intensity::default(),
        _ => *required_enum::<Intensity>(matches, &format!("{state}-intensity")),
    };

    Color::new(hue, intensity)
}

/// Read an enum option from CLI or prompt for STDIN if not present.
fn required_enum<'a, T>(matches: &'a ArgMatches, name: &str) -> &'a T
where
    T: ValueEnum + Display + Debug + Copy + Sync + Send + 'static,
{
    if let Some(value) = matches.get_one::<T>(name) {
        return value;
    }

    required_choice(name, T::value_variants())
}

/// Prompt for one of the `choices` until a valid index is entered.
fn required_choice<'a, T: Display>(name: &str, choices: &'a [T]) -> &'a T {
    loop {
        println!("[{}] Please select a number:", name);
        for (i, choice) in choices.iter().enumerate() {
            println!("  [{}] {}", i, choice);
        }
        print!(" > ");
        let _ = io::stdout().flush();

        let input = stdin_nextline();

        match usize::from_str(&input).ok().and_then(|index| choices.get(index)) {
            Some(choice) => {
                println!();
                return choice;
            },
            // Query again if the index is not valid.
            _ => println!("\x1b[31mChoice '{}' does not exist, please try again.\x1b[0m\n", input),
        }
    }
}

/// Read next line from STDIN.
#[inline]
fn stdin_nextline() -> String {
    let mut input = String::new();

    let _ = io::stdin().read_line(&mut input);
    input = input.trim().to_string();

    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapply_command() {
        let config = Config {
            model: "Komplete Kontrol S61 MK2",
            up: Color::new(Hue::LightOrange, Intensity::Saturated),
            down: Color::new(Hue::Off, Intensity::High),
            interactive: true,
        };

        assert_eq!(
            config.to_string(),
            "kkcolors \\\n  --model \"Komplete Kontrol S61 MK2\" \\\n  --up-color light-orange \\\n  \
             --up-intensity saturated \\\n  --down-color off"
        );
    }

    #[test]
    fn cli_names_parse_back() {
        for hue in Hue::value_variants() {
            assert_eq!(parse_name::<Hue>(&value_name(*hue)), Ok(*hue));
            assert_eq!(parse_name::<Hue>(&hue.to_string()), Ok(*hue));
        }
        for intensity in Intensity::value_variants() {
            assert_eq!(parse_name::<Intensity>(&value_name(*intensity)), Ok(*intensity));
        }
        assert!(parse_name::<Hue>("pink").is_err());
    }

    #[test]
    fn cli_is_valid() {
        Command::new(crate_name!())
            .subcommand(Command::new("reset").arg(model_arg()))
            .arg(model_arg())
            .arg(hue_arg("up-color", "up"))
            .arg(intensity_arg("up-intensity", "up"))
            .arg(hue_arg("down-color", "down"))
            .arg(intensity_arg("down-intensity", "down"))
            .debug_assert();
    }
}
