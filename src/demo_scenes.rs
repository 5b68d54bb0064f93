use mball_draw::geometry::{primitives, CurveCache, DisplayListError};
use mball_draw::renderer::{BatchBackend, SurfaceBatch};
use mball_draw::scene::{MetaBall, Object, Scene};
use mball_draw::{BatchDirtyMode, MetaBallDrawCache, ObjectKey};

/// Two-member metaball family drawn for a couple of frames, with a geometry
/// edit in between.
pub fn run_family_scene<B: BatchBackend>(
    cache: &mut MetaBallDrawCache<B>,
) -> Result<(), DisplayListError> {
    let mut scene = Scene::new();
    let mb = scene.add_metaball(MetaBall::new("Mball"));
    let basis = scene.add_object(
        Object::new("Mball", mb).with_curve_cache(CurveCache::new(primitives::octahedron(1.0)?)),
    );
    let member = scene.add_object(Object::new("Mball.001", mb));

    for frame in 0..3 {
        draw_frame(cache, &mut scene, &[basis, member], frame);
    }

    // Stand-in for the polygonizer re-running after an edit
    if let Some(ob) = scene.object_mut(basis) {
        ob.curve_cache = Some(CurveCache::new(primitives::triangle_strip(16)?));
    }
    if let Some(data) = scene.metaball_mut(mb) {
        cache.mark_dirty(data, BatchDirtyMode::All);
    }
    draw_frame(cache, &mut scene, &[basis, member], 3);

    cache.free_all(&mut scene);
    log::info!("Finished with {:?}", cache.stats());
    Ok(())
}

fn draw_frame<B: BatchBackend>(
    cache: &mut MetaBallDrawCache<B>,
    scene: &mut Scene,
    objects: &[ObjectKey],
    frame: u32,
) {
    for &object in objects {
        let name = scene
            .object(object)
            .map(|ob| ob.name.clone())
            .unwrap_or_default();
        match cache
            .get_surface_batch(scene, object)
            .and_then(|handle| cache.batch(handle))
        {
            Some(batch) => log::info!(
                "frame {}: {} draws {} triangles",
                frame,
                name,
                batch.triangle_count()
            ),
            None => log::debug!("frame {}: {} contributes to its basis", frame, name),
        }
    }
}
