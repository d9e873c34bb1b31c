use anyhow::Context;
use catalog_cart_api::{config::AppConfig, models::NewProduct, state::AppState};
use serde_json::Number;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config);

    let existing = state.products.list().await?;
    if !existing.is_empty() {
        println!(
            "{} already holds {} products, nothing to seed",
            config.products_file.display(),
            existing.len()
        );
        return Ok(());
    }

    seed_products(&state).await?;
    println!("Seed completed into {}", config.products_file.display());
    Ok(())
}

async fn seed_products(state: &AppState) -> anyhow::Result<()> {
    let products = [
        ("Ferris Mug", "Coffee tastes better with Ferris", "MUG-001", 12.5, 100u64, "Kitchen"),
        ("Rust Sticker Pack", "Decorate your laptop", "STK-010", 5.0, 200, "Stationery"),
        ("Axum Hoodie", "Warm hoodie for Rustaceans", "HOO-042", 55.0, 50, "Apparel"),
        ("E-book: Async Rust", "Learn async Rust patterns", "EBK-007", 25.0, 75, "Books"),
    ];

    for (title, description, code, price, stock, category) in products {
        let product = state
            .products
            .create(NewProduct {
                title: title.to_string(),
                description: description.to_string(),
                code: code.to_string(),
                price: Number::from_f64(price).context("seed price must be finite")?,
                stock: Number::from(stock),
                category: category.to_string(),
                ..NewProduct::default()
            })
            .await?;
        println!("Seeded product {} ({title})", product.id);
    }

    Ok(())
}
