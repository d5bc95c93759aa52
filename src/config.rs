use std::env;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,

    /// Fixed offset used to bucket check-ins into calendar days. The
    /// original deployment serves users in Asia/Tokyo, hence the +9 default.
    pub checkin_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Self {
        let offset_hours: i32 = env::var("CHECKIN_UTC_OFFSET_HOURS")
            .unwrap_or_else(|_| "9".into())
            .parse()
            .expect("CHECKIN_UTC_OFFSET_HOURS must be a number");

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            checkin_offset: FixedOffset::east_opt(offset_hours * 3600)
                .expect("CHECKIN_UTC_OFFSET_HOURS out of range"),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The current check-in day for a given instant.
    pub fn checkin_today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.checkin_offset).date_naive()
    }
}
