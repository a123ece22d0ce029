use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context as _, bail};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use qr_payload::{
    ChartRenderer, Config, Contact, Content, Currency, Email, Event, FormatOptions, Generator,
    ImageHandle, Location, MemoryStore, Payment, Phone, Sms, TextContent, UrlContent, UsageStats,
    Wifi, WifiSecurity, format,
};
use tracing::Level;

#[derive(Parser)]
#[command(name = "qrpayload", version, about = "Build QR code payloads from form fields")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Time zone event times are written in (IANA name)
    #[arg(long, global = true, value_parser = parse_tz)]
    tz: Option<Tz>,
    /// Also print the image URL for each payload
    #[arg(long, global = true)]
    image: bool,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Web link (https:// is added when no scheme is given)
    Url { url: String },
    /// Free text, encoded as-is
    Text { text: String },
    /// vCard 3.0 contact
    Contact {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        organization: String,
        #[arg(long, default_value = "")]
        url: String,
    },
    /// WiFi network credentials
    Wifi {
        #[arg(long)]
        ssid: String,
        #[arg(long, default_value = "")]
        password: String,
        /// WPA, WEP or nopass
        #[arg(long, default_value = "WPA", value_parser = parse_security)]
        security: WifiSecurity,
        #[arg(long)]
        hidden: bool,
    },
    /// SMS message
    Sms {
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// mailto: link
    Email {
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        body: String,
    },
    /// tel: link
    Phone { phone: String },
    /// geo: coordinates
    Location {
        #[arg(long, allow_hyphen_values = true)]
        lat: String,
        #[arg(long, allow_hyphen_values = true)]
        lng: String,
    },
    /// iCalendar event
    Event {
        #[arg(long)]
        title: String,
        /// Local start, e.g. 2024-01-01T10:00
        #[arg(long)]
        start: String,
        /// Local end, e.g. 2024-01-01T11:00
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// UPI payment link
    Payment {
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        amount: String,
        /// USD, EUR, INR or GBP
        #[arg(long, default_value = "USD", value_parser = parse_currency)]
        currency: Currency,
    },
    /// Any record as JSON, e.g. '{"type":"sms","phone":"123"}'
    Json { record: String },
    /// Read lines from stdin and print one payload per non-blank line
    Batch,
}

fn parse_tz(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>().map_err(|_| format!("unknown time zone {s:?}"))
}

fn parse_security(s: &str) -> Result<WifiSecurity, String> {
    match s {
        "WPA" | "wpa" => Ok(WifiSecurity::Wpa),
        "WEP" | "wep" => Ok(WifiSecurity::Wep),
        "nopass" | "open" => Ok(WifiSecurity::NoPass),
        other => Err(format!("unknown security {other:?}, expected WPA, WEP or nopass")),
    }
}

fn parse_currency(s: &str) -> Result<Currency, String> {
    match s.to_ascii_uppercase().as_str() {
        "USD" => Ok(Currency::Usd),
        "EUR" => Ok(Currency::Eur),
        "INR" => Ok(Currency::Inr),
        "GBP" => Ok(Currency::Gbp),
        _ => Err(format!("unknown currency {s:?}, expected USD, EUR, INR or GBP")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing log subscriber: {err}"))?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let options = match cli.tz {
        Some(tz) => FormatOptions::with_timezone(tz),
        None => config.format_options()?,
    };

    let stats = UsageStats::open(MemoryStore::new())?;
    let mut generator = Generator::new(ChartRenderer::new(config.chart.base_url.clone()), stats)
        .with_render_config(config.render_config()?)
        .with_batch_config(config.batch_config()?)
        .with_options(options);

    let content = match content_from(cli.command)? {
        Some(content) => content,
        None => return batch_cmd(&generator, cli.image),
    };

    let generated = match generator.generate(&content) {
        Some(generated) => generated,
        None => return Err(explain_absent(&content, generator.options())),
    };

    println!("{}", generated.payload);
    if cli.image {
        print_image(&generated.image);
    }
    Ok(())
}

/// The single record a subcommand describes; `None` for batch mode
fn content_from(command: Command) -> anyhow::Result<Option<Content>> {
    let content = match command {
        Command::Batch => return Ok(None),
        Command::Json { record } => {
            serde_json::from_str::<Content>(&record).context("parsing JSON record")?
        }
        Command::Url { url } => Content::Url(UrlContent { url }),
        Command::Text { text } => Content::Text(TextContent { text }),
        Command::Contact {
            first_name,
            last_name,
            phone,
            email,
            organization,
            url,
        } => Content::Contact(Contact {
            first_name,
            last_name,
            phone,
            email,
            organization,
            url,
        }),
        Command::Wifi {
            ssid,
            password,
            security,
            hidden,
        } => Content::Wifi(Wifi {
            ssid,
            password,
            security,
            hidden,
        }),
        Command::Sms { phone, message } => Content::Sms(Sms { phone, message }),
        Command::Email {
            address,
            subject,
            body,
        } => Content::Email(Email {
            address,
            subject,
            body,
        }),
        Command::Phone { phone } => Content::Phone(Phone { phone }),
        Command::Location { lat, lng } => Content::Location(Location { lat, lng }),
        Command::Event {
            title,
            start,
            end,
            description,
        } => Content::Event(Event {
            title,
            start,
            end,
            description,
        }),
        Command::Payment {
            recipient,
            amount,
            currency,
        } => Content::Payment(Payment {
            recipient,
            amount,
            currency,
        }),
    };
    Ok(Some(content))
}

fn explain_absent(content: &Content, options: &FormatOptions) -> anyhow::Error {
    if !content.has_minimum_fields() {
        return anyhow::anyhow!(
            "{} record is missing its required fields, nothing to encode",
            content.content_type()
        );
    }
    match format(content, options) {
        Err(err) => anyhow::Error::new(err).context("record could not be formatted"),
        Ok(_) => anyhow::anyhow!("{} record produced no payload", content.content_type()),
    }
}

fn print_image(image: &Result<ImageHandle, qr_payload::RenderError>) {
    match image {
        Ok(ImageHandle::Remote { url }) => println!("{url}"),
        Ok(ImageHandle::Raster(img)) => println!("<raster {}x{}>", img.width(), img.height()),
        Err(err) => eprintln!("image: {err}"),
    }
}

fn batch_cmd(
    generator: &Generator<ChartRenderer, MemoryStore>,
    show_image: bool,
) -> anyhow::Result<()> {
    let mut block = String::new();
    std::io::stdin()
        .read_to_string(&mut block)
        .context("reading batch from stdin")?;

    let items = generator.generate_batch(&block);
    if items.is_empty() {
        bail!("no non-blank lines on stdin");
    }
    for item in &items {
        println!("{}\t{}", item.file_name, item.payload);
        if show_image {
            print_image(&item.image);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Command {
        let mut argv = vec!["qrpayload"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_batch_has_no_single_record() {
        assert!(content_from(command(&["batch"])).unwrap().is_none());
    }

    #[test]
    fn test_subcommand_builds_record() {
        let content = content_from(command(&["sms", "--phone", "555", "--message", "hi"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            content,
            Content::Sms(Sms {
                phone: "555".into(),
                message: "hi".into(),
            })
        );

        let content = content_from(command(&["wifi", "--ssid", "Home", "--security", "nopass"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            qr_payload::format(&content, &FormatOptions::default()).unwrap(),
            "WIFI:T:nopass;S:Home;P:;H:false;;"
        );
    }

    #[test]
    fn test_json_record() {
        let content = content_from(command(&["json", r#"{"type":"phone","phone":"911"}"#]))
            .unwrap()
            .unwrap();
        assert_eq!(content.content_type(), qr_payload::ContentType::Phone);

        assert!(content_from(command(&["json", "{not json"])).is_err());
    }
}
