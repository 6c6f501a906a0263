//! Canonical records emitted by a scrape run.
//!
//! These are handed to whatever persistence or aggregation layer the caller
//! uses; this crate has no opinion on storage format.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock availability as advertised on a listing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    /// Orderable but not necessarily held in stock (e.g. "available to order").
    Available,
    #[default]
    Unknown,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "in_stock"),
            StockStatus::OutOfStock => write!(f, "out_of_stock"),
            StockStatus::Available => write!(f, "available"),
            StockStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A product listing scraped from a supplier category page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedProduct {
    /// Supplier SKU. Unique within the result of one page scrape.
    pub sku: String,
    pub name: String,
    pub brand: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    /// `None` when the listing shows no parseable price; the record is kept.
    pub current_price: Option<Decimal>,
    /// Set only when the product is on sale.
    pub regular_price: Option<Decimal>,
    pub is_on_sale: bool,
    /// `None` exactly when `is_on_sale` is false.
    pub discount_percentage: Option<i32>,
    pub description: Option<String>,
    pub highlights: Vec<String>,
    pub image_url: Option<String>,
    /// Always set; falls back to a supplier search URL for the product name.
    pub product_url: String,
    pub stock_status: StockStatus,
    /// Display name of the supplier this record came from.
    pub supplier: String,
    pub scraped_at: DateTime<Utc>,
}

/// Kind of promotion a deal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DealType {
    #[default]
    WeeklyDeal,
    Clearance,
    Bundle,
    FlashSale,
}

impl std::fmt::Display for DealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DealType::WeeklyDeal => write!(f, "weekly_deal"),
            DealType::Clearance => write!(f, "clearance"),
            DealType::Bundle => write!(f, "bundle"),
            DealType::FlashSale => write!(f, "flash_sale"),
        }
    }
}

/// A promotional deal scraped from a supplier's deals page.
///
/// Deals are defined by their price: a candidate without one never becomes a
/// `ScrapedDeal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedDeal {
    pub product_sku: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub original_price: Option<Decimal>,
    pub deal_price: Decimal,
    /// Zero when no valid original price is known.
    pub discount_percentage: i32,
    pub deal_type: DealType,
    pub expires_at: DateTime<Utc>,
    pub source_url: String,
    pub image_url: Option<String>,
    pub supplier: String,
}

/// A voucher code published by a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedCoupon {
    pub code: String,
    pub description: String,
    pub discount_percentage: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
    pub source_url: String,
    pub supplier: String,
}
