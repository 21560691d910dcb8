use std::collections::HashMap;

mod data;
mod traj;

pub use data::read_data_masses;
pub use data::write_data;
pub use traj::TrajectoryWriter;

/// Per-atom type ids plus the distinct labels in first-occurrence order,
/// numbered from 1.
pub(crate) fn assign_type_ids(elements: &[String]) -> (Vec<i32>, Vec<(String, i32)>) {
    let mut type_map: HashMap<&str, i32> = HashMap::new();
    let mut order: Vec<(String, i32)> = Vec::new();
    let mut next_type = 1i32;
    let mut ids = Vec::with_capacity(elements.len());
    for elem in elements {
        let id = *type_map.entry(elem.as_str()).or_insert_with(|| {
            order.push((elem.clone(), next_type));
            let id = next_type;
            next_type += 1;
            id
        });
        ids.push(id);
    }
    (ids, order)
}
