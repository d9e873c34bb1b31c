use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub products_file: PathBuf,
    pub carts_file: PathBuf,
    pub public_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("APP_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let products_file = lookup("PRODUCTS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/products.json"));
        let carts_file = lookup("CARTS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/carts.json"));
        let public_dir = lookup("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public"));

        anyhow::ensure!(
            products_file != carts_file,
            "PRODUCTS_FILE and CARTS_FILE must point at different files"
        );

        Ok(Self {
            host,
            port,
            products_file,
            carts_file,
            public_dir,
        })
    }
}
