use super::config::Placement;
use super::error::EngineError;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::rotation_from_axis_angle;
use nalgebra::Vector3;
use tracing::trace;

/// Moves `cluster` into its final position relative to a monomer centred at the origin.
///
/// The cluster is centred on its centre of mass, rotated by `placement.angle`
/// degrees about `placement.axis`, and then shifted by `placement.distance`
/// along +z. An empty cluster is left untouched apart from the (no-op) shift.
///
/// # Errors
///
/// Returns [`EngineError::Placement`] if the axis has zero length.
pub fn place_cluster(
    cluster: &mut MolecularSystem,
    placement: &Placement,
) -> Result<(), EngineError> {
    let rotation = rotation_from_axis_angle(&placement.axis_vector(), placement.angle)
        .ok_or_else(|| {
            EngineError::Placement(format!(
                "rotation axis {:?} has zero length",
                placement.axis
            ))
        })?;

    cluster.center_at_origin();
    cluster.rotate(&rotation);
    cluster.translate(&Vector3::new(0.0, 0.0, placement.distance));
    Ok(())
}

/// Builds the combined structure: monomer atoms first, then the placed cluster.
///
/// No overlap check is made; choosing a physically sensible distance is up to
/// the caller.
pub fn combine(
    mut monomer: MolecularSystem,
    mut cluster: MolecularSystem,
    placement: &Placement,
) -> Result<MolecularSystem, EngineError> {
    monomer.center_at_origin();
    place_cluster(&mut cluster, placement)?;
    trace!(
        monomer_atoms = monomer.len(),
        cluster_atoms = cluster.len(),
        distance = placement.distance,
        angle = placement.angle,
        "Combined monomer and cluster."
    );
    Ok(monomer.concat(cluster))
}
