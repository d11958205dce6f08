use strum::EnumString;

#[cfg(debug_assertions)]
const DEFAULT_ENV: &str = "development";
#[cfg(not(debug_assertions))]
const DEFAULT_ENV: &str = "production";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

pub fn which() -> Environment {
    let env = std::env::var("ENV").unwrap_or_else(|_| DEFAULT_ENV.into());
    env.parse().unwrap_or(Environment::Development)
}
