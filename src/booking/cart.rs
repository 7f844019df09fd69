use chrono::{NaiveDate, NaiveTime};

/// A booking line frozen at the moment it was added to the cart.
///
/// The price is computed once here, so later changes to the draft never leak
/// into items already in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub service: String,
    pub duration_min: u32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub price: u32,
}

/// Ordered line items of one conversation. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Removes the item at `index`, returning it. Out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<CartItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Empties the cart, handing back everything it held.
    pub fn take(&mut self) -> Vec<CartItem> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(service: &str, hour: u32) -> CartItem {
        CartItem {
            service: service.to_string(),
            duration_min: 60,
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            price: 60,
        }
    }

    #[test]
    fn test_remove_first_keeps_second() {
        let mut cart = Cart::new();
        cart.add(item("classic", 10));
        cart.add(item("relax", 11));

        let removed = cart.remove_at(0);

        assert_eq!(removed.map(|i| i.service), Some("classic".to_string()));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0], item("relax", 11));
    }

    #[test]
    fn test_remove_out_of_bounds_is_noop() {
        let mut cart = Cart::new();
        cart.add(item("classic", 10));
        assert_eq!(cart.remove_at(1), None);
        assert_eq!(cart.remove_at(usize::MAX), None);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_order_is_stable_across_removals() {
        let mut cart = Cart::new();
        for hour in 10..15 {
            cart.add(item("classic", hour));
        }
        cart.remove_at(2);
        cart.remove_at(0);
        let hours: Vec<_> = cart.items().iter().map(|i| i.time).collect();
        let expected: Vec<_> = [11, 13, 14]
            .iter()
            .map(|h| NaiveTime::from_hms_opt(*h, 0, 0).unwrap())
            .collect();
        assert_eq!(hours, expected);
    }

    #[test]
    fn test_length_tracks_adds_and_successful_removes() {
        let mut cart = Cart::new();
        let mut expected = 0usize;
        for step in 0..40usize {
            match step % 5 {
                0 | 1 | 2 => {
                    cart.add(item("relax", 10));
                    expected += 1;
                }
                3 => {
                    if cart.remove_at(step % 7).is_some() {
                        expected -= 1;
                    }
                }
                _ => {
                    if cart.remove_at(1000).is_some() {
                        expected -= 1;
                    }
                }
            }
            assert_eq!(cart.len(), expected);
        }
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_take_empties_cart() {
        let mut cart = Cart::new();
        cart.add(item("classic", 10));
        let items = cart.take();
        assert_eq!(items.len(), 1);
        assert!(cart.is_empty());
    }
}
