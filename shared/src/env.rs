use std::env;

#[derive(Default, Debug, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

// ENV が未設定または不明な値なら、ビルドプロファイルで決める
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = Environment::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Environment::Production;

    match env::var("ENV") {
        Err(_) => default_env,
        Ok(v) => parse(&v).unwrap_or(default_env),
    }
}

fn parse(value: &str) -> Option<Environment> {
    match value {
        "production" => Some(Environment::Production),
        "development" => Some(Environment::Development),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_only() {
        assert_eq!(parse("production"), Some(Environment::Production));
        assert_eq!(parse("development"), Some(Environment::Development));
        assert_eq!(parse("staging"), None);
    }
}
