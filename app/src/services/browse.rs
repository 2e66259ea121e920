// app/src/services/browse.rs

//! Product listing filters and sort orders for the explore screen, and the
//! home screen's feeds.

use crate::models::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRange {
  #[default]
  #[serde(rename = "all")]
  All,
  #[serde(rename = "under-1m")]
  Under1M,
  #[serde(rename = "1m-3m")]
  From1MTo3M,
  #[serde(rename = "3m-5m")]
  From3MTo5M,
  #[serde(rename = "above-5m")]
  Above5M,
}

impl PriceRange {
  /// Inclusive `(min, max)` bounds.
  pub fn bounds(self) -> (i64, i64) {
    match self {
      PriceRange::All => (0, 999_999_999),
      PriceRange::Under1M => (0, 1_000_000),
      PriceRange::From1MTo3M => (1_000_000, 3_000_000),
      PriceRange::From3MTo5M => (3_000_000, 5_000_000),
      PriceRange::Above5M => (5_000_000, 999_999_999),
    }
  }

  pub fn contains(self, price: i64) -> bool {
    let (min, max) = self.bounds();
    price >= min && price <= max
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
  #[default]
  Latest,
  Popular,
  PriceLow,
  PriceHigh,
  Rating,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
  pub search: Option<String>,
  pub category_id: Option<i64>,
  #[serde(default)]
  pub price_range: PriceRange,
  #[serde(default)]
  pub sort: SortOrder,
}

impl ProductQuery {
  fn search_term(&self) -> Option<String> {
    self.search.as_deref().filter(|s| !s.is_empty()).map(str::to_lowercase)
  }

  /// Number of filters that differ from the defaults, for the filter badge.
  pub fn active_filter_count(&self) -> usize {
    [
      self.search_term().is_some(),
      self.category_id.is_some(),
      self.sort != SortOrder::default(),
      self.price_range != PriceRange::default(),
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
  }

  /// Filters then sorts `products`. Sorting is stable.
  pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
    let needle = self.search_term();
    let mut filtered: Vec<Product> = products
      .into_iter()
      .filter(|p| needle.as_ref().map_or(true, |n| p.title.to_lowercase().contains(n.as_str())))
      .filter(|p| self.category_id.map_or(true, |c| p.category_id == Some(c)))
      .filter(|p| self.price_range.contains(p.price))
      .collect();

    match self.sort {
      SortOrder::Latest => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
      SortOrder::Popular => filtered.sort_by_key(|p| std::cmp::Reverse(p.sold.unwrap_or(0))),
      SortOrder::PriceLow => filtered.sort_by_key(|p| p.price),
      SortOrder::PriceHigh => filtered.sort_by_key(|p| std::cmp::Reverse(p.price)),
      SortOrder::Rating => filtered.sort_by(|a, b| b.rating.unwrap_or(0.0).total_cmp(&a.rating.unwrap_or(0.0))),
    }
    filtered
  }
}

/// Cap on each home screen section.
pub const HOME_FEED_LIMIT: usize = 6;

#[derive(Debug, Clone, Default, Serialize)]
pub struct HomeFeed {
  /// Discounted products, biggest discount first.
  pub featured: Vec<Product>,
  /// Best sellers; missing `sold` counts as zero.
  pub popular: Vec<Product>,
  pub newest: Vec<Product>,
}

fn top_by(mut list: Vec<Product>, compare: impl FnMut(&Product, &Product) -> Ordering) -> Vec<Product> {
  list.sort_by(compare);
  list.truncate(HOME_FEED_LIMIT);
  list
}

/// Builds the three home sections from the full product list.
pub fn home_feed(products: &[Product]) -> HomeFeed {
  let discounted = products.iter().filter(|p| p.discount.is_some()).cloned().collect();
  HomeFeed {
    featured: top_by(discounted, |a, b| b.discount.cmp(&a.discount)),
    popular: top_by(products.to_vec(), |a, b| b.sold.unwrap_or(0).cmp(&a.sold.unwrap_or(0))),
    newest: top_by(products.to_vec(), |a, b| b.created_at.cmp(&a.created_at)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};

  fn product(id: i64, title: &str, price: i64, category_id: i64, day: u32) -> Product {
    Product {
      id,
      title: title.to_string(),
      description: None,
      price,
      image_url: None,
      stock: 5,
      category_id: Some(category_id),
      sold: None,
      rating: None,
      discount: None,
      created_at: Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(),
    }
  }

  fn catalog() -> Vec<Product> {
    let mut sofa = product(1, "Sofa Bed Linen", 4_200_000, 1, 3);
    sofa.sold = Some(12);
    sofa.rating = Some(4.5);
    let mut chair = product(2, "Kursi Rotan", 750_000, 1, 5);
    chair.sold = Some(40);
    let mut table = product(3, "Meja Makan Jati", 6_500_000, 2, 1);
    table.rating = Some(4.9);
    let wardrobe = product(4, "Lemari Sofa-Style", 3_000_000, 2, 4);
    vec![sofa, chair, table, wardrobe]
  }

  fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|p| p.id).collect()
  }

  #[test]
  fn default_query_sorts_newest_first() {
    let result = ProductQuery::default().apply(catalog());
    assert_eq!(ids(&result), vec![2, 4, 1, 3]);
  }

  #[test]
  fn search_is_case_insensitive_substring() {
    let query = ProductQuery {
      search: Some("SOFA".into()),
      ..Default::default()
    };
    assert_eq!(ids(&query.apply(catalog())), vec![4, 1]);
  }

  #[test]
  fn category_and_price_range_combine() {
    let query = ProductQuery {
      category_id: Some(2),
      price_range: PriceRange::From1MTo3M,
      ..Default::default()
    };
    // Bounds are inclusive: 3 000 000 is in "1m-3m".
    assert_eq!(ids(&query.apply(catalog())), vec![4]);
  }

  #[test]
  fn sort_orders() {
    let sorted = |sort| {
      ids(&ProductQuery {
        sort,
        ..Default::default()
      }
      .apply(catalog()))
    };
    assert_eq!(sorted(SortOrder::PriceLow), vec![2, 4, 1, 3]);
    assert_eq!(sorted(SortOrder::PriceHigh), vec![3, 1, 4, 2]);
    assert_eq!(sorted(SortOrder::Popular), vec![2, 1, 3, 4]);
    assert_eq!(sorted(SortOrder::Rating), vec![3, 1, 2, 4]);
  }

  #[test]
  fn query_string_names() {
    let query: ProductQuery = serde_json::from_str(r#"{"price_range": "above-5m", "sort": "price-high"}"#).unwrap();
    assert_eq!(query.price_range, PriceRange::Above5M);
    assert_eq!(query.sort, SortOrder::PriceHigh);
    assert_eq!(query.active_filter_count(), 2);
    assert_eq!(ProductQuery::default().active_filter_count(), 0);
  }

  #[test]
  fn home_feed_features_only_discounted_products() {
    let mut products = catalog();
    products[0].discount = Some(10);
    products[2].discount = Some(25);
    products[3].discount = Some(0);

    let feed = home_feed(&products);
    // A zero discount is still a discount; a missing one is not.
    assert_eq!(ids(&feed.featured), vec![3, 1, 4]);
    assert!(feed.featured.iter().all(|p| p.id != 2));
    assert_eq!(ids(&feed.popular), vec![2, 1, 3, 4]);
    assert_eq!(ids(&feed.newest), vec![2, 4, 1, 3]);
  }

  #[test]
  fn home_feed_sections_hold_at_most_six() {
    let products: Vec<Product> = (1..=10)
      .map(|id| {
        let mut p = product(id, "Kursi", 100_000, 1, id as u32);
        p.sold = Some(id as i32);
        p.discount = Some(id as i32 * 5);
        p
      })
      .collect();

    let feed = home_feed(&products);
    assert_eq!(feed.featured.len(), HOME_FEED_LIMIT);
    assert_eq!(ids(&feed.featured), vec![10, 9, 8, 7, 6, 5]);
    assert_eq!(ids(&feed.popular), vec![10, 9, 8, 7, 6, 5]);
    assert_eq!(ids(&feed.newest), vec![10, 9, 8, 7, 6, 5]);
    assert!(home_feed(&[]).featured.is_empty());
  }
}
