use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";
const SECTIONS: &[&str] = &["page", "font", "colors", "batch"];

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");

    let content = fs::read_to_string(CONFIG_PATH).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {e}"),
    };

    // The embedded defaults must spell out every section
    for section in SECTIONS {
        if !table.get(*section).is_some_and(toml::Value::is_table) {
            panic!("default_config.toml is missing the [{section}] section");
        }
    }
}
