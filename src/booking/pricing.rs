use crate::booking::catalog::Catalog;
use crate::booking::error::BookingError;

/// Price of `duration_min` minutes of the service, scaled linearly from its
/// hourly base price.
///
/// Half-way results round to the nearest even euro, so 52.5 becomes 52 and
/// 27.5 becomes 28.
pub fn price(catalog: &Catalog, service_key: &str, duration_min: u32) -> Result<u32, BookingError> {
    let base = catalog.service(service_key)?.base_price;
    Ok(scale_hourly(base, duration_min))
}

fn scale_hourly(base: u32, duration_min: u32) -> u32 {
    let total = u64::from(base) * u64::from(duration_min);
    let quotient = total / 60;
    let remainder = total % 60;
    let rounded = match (remainder * 2).cmp(&60) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient % 2),
    };
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_hour_is_base_price() {
        let catalog = Catalog::standard();
        for service in catalog.services() {
            assert_eq!(price(&catalog, service.key, 60), Ok(service.base_price));
        }
    }

    #[test]
    fn test_half_euro_rounds_to_even() {
        // 70 * 45 / 60 = 52.5
        assert_eq!(scale_hourly(70, 45), 52);
        // 55 * 30 / 60 = 27.5
        assert_eq!(scale_hourly(55, 30), 28);
        // 55 * 45 / 60 = 41.25
        assert_eq!(scale_hourly(55, 45), 41);
        // 55 * 90 / 60 = 82.5
        assert_eq!(scale_hourly(55, 90), 82);
    }

    #[test]
    fn test_matches_linear_formula_for_whole_catalog() {
        let catalog = Catalog::standard();
        for service in catalog.services() {
            for option in catalog.durations() {
                let exact = f64::from(service.base_price) * f64::from(option.minutes) / 60.0;
                let got = price(&catalog, service.key, option.minutes).unwrap();
                assert!((f64::from(got) - exact).abs() <= 0.5, "{} {}", service.key, option.minutes);
            }
        }
    }

    #[test]
    fn test_unknown_service_is_rejected() {
        let catalog = Catalog::standard();
        assert_eq!(
            price(&catalog, "nope", 60),
            Err(BookingError::InvalidServiceKey("nope".to_string()))
        );
    }
}
