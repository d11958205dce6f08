use anyhow::Result;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub booking: BookingConfig,
    pub pricing: PricingConfig,
    pub mailer: MailerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Ok(Self {
            database: DatabaseConfig {
                host: env_or("DATABASE_HOST", "localhost"),
                port: env_parse_or("DATABASE_PORT", 5432)?,
                username: env_or("DATABASE_USERNAME", "app"),
                password: env_or("DATABASE_PASSWORD", "passwd"),
                database: env_or("DATABASE_NAME", "app"),
            },
            booking: BookingConfig {
                window_open_days: env_parse_or("BOOKING_WINDOW_OPEN_DAYS", 7)?,
                month_range: env_parse_or("CONTEXT_MONTH_RANGE", 2)?,
            },
            pricing: PricingConfig {
                member_price: env_parse_or("PRICE_MEMBER_CENTS", 1500)?,
                visitor_price: env_parse_or("PRICE_VISITOR_CENTS", 2500)?,
            },
            mailer: MailerConfig {
                endpoint: env_or("MAILER_ENDPOINT", "http://localhost:8025/api/send"),
                sender: env_or("MAILER_SENDER", "reservations@club.example"),
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

// Policy knobs for the booking ledger and the month context.
#[derive(Debug, Clone, Copy)]
pub struct BookingConfig {
    /// Next-month reservations open during the final N days of the
    /// current month.
    pub window_open_days: u32,
    /// A month context may be requested at most N months away from today.
    pub month_range: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct PricingConfig {
    /// Per-session price for members, in cents.
    pub member_price: i64,
    /// Per-session price for non-member visitors, in cents.
    pub visitor_price: i64,
}

#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub endpoint: String,
    pub sender: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.parse::<T>()?),
        Err(_) => Ok(default),
    }
}
