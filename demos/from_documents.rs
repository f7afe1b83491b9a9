// Templates and options from TOML/YAML documents
//
// Run with: cargo run --example from_documents --features toml,yaml

use optval::format::for_extension;
use optval::{TemplateFormat, TomlFormat, ValidatedOptions, YamlFormat};

const TEMPLATE: &str = r#"
name = "string"

[port]
type = "number"
minValue = 1024
maxValue = 65535

[log]
type = "object"
dir = "folder-path"
level = { type = "string", acceptedValues = ["error", "warn", "info", "debug"] }
"#;

const OPTIONS: &str = r#"
name: worker
port: 9000
log:
  dir: /var/log/worker
  level: verbose
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let template = TomlFormat.parse_template(TEMPLATE)?;
    println!("📄 Template decoded from TOML:\n{:#}\n", template.to_value());

    let options = YamlFormat.parse(OPTIONS)?;
    match ValidatedOptions::new(&template, &options) {
        Ok(_) => println!("✅ Options are valid"),
        Err(e) => println!("❌ {e}"),
    }

    // Formats can also be picked by file extension
    let json = for_extension("json").ok_or("json format missing")?;
    let options = json.parse(r#"{ "name": "worker", "port": 9000, "log": { "level": "info" } }"#)?;
    let validated = ValidatedOptions::new(&template, options)?;
    println!("✅ JSON options are valid: {}", validated.to_object());

    Ok(())
}
