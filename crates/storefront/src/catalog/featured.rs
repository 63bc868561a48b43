//! Featured selections shown on the storefront landing view.

use crate::model::Product;

/// Rating above which a product counts as highly rated.
pub const HIGH_RATING_THRESHOLD: f64 = 4.0;

/// Products rated strictly above [`HIGH_RATING_THRESHOLD`], in catalog order.
pub fn high_rated(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.rating.rate > HIGH_RATING_THRESHOLD)
        .collect()
}

/// The `n` best rated products, best first. Ties keep catalog order.
pub fn top_rated(products: &[Product], n: usize) -> Vec<&Product> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by(|a, b| b.rating.rate.total_cmp(&a.rating.rate));
    ranked.truncate(n);
    ranked
}

/// All products, cheapest first. Ties keep catalog order.
pub fn lowest_priced(products: &[Product]) -> Vec<&Product> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by(|a, b| a.price.total_cmp(&b.price));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ProductId, Rating};

    fn product(id: u32, price: f64, rate: f64) -> Product {
        Product {
            id: ProductId(id),
            title: format!("Item {id}"),
            price,
            description: String::new(),
            category: Category::Electronics,
            image: String::new(),
            rating: Rating { rate, count: 10 },
        }
    }

    fn ids(products: &[&Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_high_rated_is_strictly_above_four() {
        let products = vec![product(1, 10.0, 4.0), product(2, 10.0, 4.1), product(3, 10.0, 4.8)];
        assert_eq!(ids(&high_rated(&products)), vec![2, 3]);
    }

    #[test]
    fn test_top_rated_takes_best_n() {
        let products = vec![
            product(1, 10.0, 3.0),
            product(2, 10.0, 4.5),
            product(3, 10.0, 4.9),
            product(4, 10.0, 4.5),
        ];
        assert_eq!(ids(&top_rated(&products, 3)), vec![3, 2, 4]);
        assert_eq!(top_rated(&products, 10).len(), 4);
    }

    #[test]
    fn test_lowest_priced_orders_by_price() {
        let products = vec![product(1, 9.5, 3.0), product(2, 1.0, 3.0), product(3, 9.5, 3.0)];
        assert_eq!(ids(&lowest_priced(&products)), vec![2, 1, 3]);
    }
}
