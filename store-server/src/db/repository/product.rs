//! Product Repository

use chrono::Utc;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::pricing::ProductLookup;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let record_id = parse_id(PRODUCT_TABLE, id)?;
        let product: Option<Product> = self.base.db().select(record_id).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            brand: data.brand,
            in_stock: data.in_stock.unwrap_or(true),
            quantity: data.quantity.unwrap_or(0),
            tags: data.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product, touching only the supplied fields
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let record_id = parse_id(PRODUCT_TABLE, id)?;

        // Build dynamic SET clauses with typed bindings per field
        let mut set_parts: Vec<&str> = Vec::new();

        if data.name.is_some() { set_parts.push("name = $name"); }
        if data.description.is_some() { set_parts.push("description = $description"); }
        if data.price.is_some() { set_parts.push("price = $price"); }
        if data.category.is_some() { set_parts.push("category = $category"); }
        if data.brand.is_some() { set_parts.push("brand = $brand"); }
        if data.in_stock.is_some() { set_parts.push("inStock = $in_stock"); }
        if data.quantity.is_some() { set_parts.push("quantity = $quantity"); }
        if data.tags.is_some() { set_parts.push("tags = $tags"); }

        if set_parts.is_empty() {
            // Nothing to update
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)));
        }

        set_parts.push("updatedAt = $updated_at");

        let query_str = format!("UPDATE $record SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("record", record_id))
            .bind(("updated_at", Utc::now()));

        if let Some(v) = data.name { query = query.bind(("name", v)); }
        if let Some(v) = data.description { query = query.bind(("description", v)); }
        if let Some(v) = data.price { query = query.bind(("price", v)); }
        if let Some(v) = data.category { query = query.bind(("category", v)); }
        if let Some(v) = data.brand { query = query.bind(("brand", v)); }
        if let Some(v) = data.in_stock { query = query.bind(("in_stock", v)); }
        if let Some(v) = data.quantity { query = query.bind(("quantity", v)); }
        if let Some(v) = data.tags { query = query.bind(("tags", v)); }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;

        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product, returning the removed record
    pub async fn delete(&self, id: &str) -> RepoResult<Product> {
        let record_id = parse_id(PRODUCT_TABLE, id)?;
        let deleted: Option<Product> = self.base.db().delete(record_id).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }
}

impl ProductLookup for ProductRepository {
    async fn product_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        // An unparseable reference cannot resolve to a product; pricing
        // reports it as an unknown product rather than a malformed request.
        match self.find_by_id(id).await {
            Err(RepoError::InvalidId(_)) => Ok(None),
            other => other,
        }
    }
}
