//! Shipping quotes for a package across a set of carriers.

use crate::carrier::Carrier;

use super::{Package, PackageError, ShippingQuote};

/// Quotes every carrier that serves the package's destination region.
///
/// Quotes are sorted by lead time, fastest first. The sort is stable, so
/// carriers with equal lead times keep their order in `carriers`. An empty
/// list means no carrier serves the region.
pub fn quote_available_shippings(
    package: &Package,
    carriers: &[Carrier],
) -> Result<Vec<ShippingQuote>, PackageError> {
    let region = package.destination_region();

    let mut quotes = carriers
        .iter()
        .filter(|carrier| carrier.is_available_for_region(region))
        .map(|carrier| {
            carrier.quote(region, package.weight()).ok_or_else(|| {
                PackageError::ShippingCalculationFailed {
                    carrier_id: carrier.id().clone(),
                    region,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    quotes.sort_by_key(ShippingQuote::estimated_days);
    Ok(quotes)
}
