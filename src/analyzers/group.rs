use std::collections::BTreeMap;

use crate::analyzers::types::Journey;

/// Buckets journeys by vendor, keeping arrival order inside each bucket.
pub fn group_by_vendor<I>(records: I) -> BTreeMap<String, Vec<Journey>>
where
    I: IntoIterator<Item = (String, Journey)>,
{
    records
        .into_iter()
        .fold(BTreeMap::new(), |mut groups, (vendor_id, journey)| {
            groups
                .entry(vendor_id)
                .or_insert_with(Vec::new)
                .push(journey);
            groups
        })
}

/// Returns the `limit` longest journeys, longest first.
///
/// The sort is stable, so journeys with equal distance keep arrival order.
pub fn rank_by_distance(journeys: &[Journey], limit: usize) -> Vec<Journey> {
    let mut ranked = journeys.to_vec();
    ranked.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    ranked.truncate(limit);
    ranked
}
