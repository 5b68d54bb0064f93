//! Behaviour of the metaball surface cache as seen by a render engine.
//!
//! Everything runs on the headless `CpuBackend`, which keeps vertices in
//! memory and counts live batches, so leaks and rebuilds are observable.
use mball_draw::geometry::{primitives, CurveCache};
use mball_draw::renderer::{CpuBackend, SurfaceBatch};
use mball_draw::scene::{MetaBall, Object, Scene};
use mball_draw::{BatchDirtyMode, MetaBallDrawCache, MetaBallKey, ObjectKey};

struct Fixture {
    scene: Scene,
    mb: MetaBallKey,
    basis: ObjectKey,
    member: ObjectKey,
    cache: MetaBallDrawCache<CpuBackend>,
}

fn fixture(triangles: usize) -> Fixture {
    let mut scene = Scene::new();
    let mb = scene.add_metaball(MetaBall::new("Mball"));
    let disp = primitives::triangle_strip(triangles).unwrap();
    let basis = scene.add_object(Object::new("Mball", mb).with_curve_cache(CurveCache::new(disp)));
    let member = scene.add_object(Object::new("Mball.001", mb));
    Fixture {
        scene,
        mb,
        basis,
        member,
        cache: MetaBallDrawCache::new(CpuBackend::new()),
    }
}

fn set_geometry(f: &mut Fixture, triangles: usize) {
    let disp = primitives::triangle_strip(triangles).unwrap();
    f.scene.object_mut(f.basis).unwrap().curve_cache = Some(CurveCache::new(disp));
}

fn free(f: &mut Fixture) {
    let mb = f.scene.metaballs.get_mut(f.mb).unwrap();
    f.cache.free(mb);
}

#[test]
fn non_basis_objects_never_get_a_batch() {
    let mut f = fixture(2);
    assert!(f.cache.get_surface_batch(&mut f.scene, f.member).is_none());
    assert!(f.cache.is_empty());

    f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();
    assert!(f.cache.get_surface_batch(&mut f.scene, f.member).is_none());

    f.cache
        .mark_dirty(f.scene.metaball_mut(f.mb).unwrap(), BatchDirtyMode::All);
    assert!(f.cache.get_surface_batch(&mut f.scene, f.member).is_none());
}

#[test]
fn repeated_lookup_returns_the_same_batch() {
    let mut f = fixture(2);
    let first = f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();
    let second = f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();

    assert_eq!(first, second);
    assert_eq!(f.cache.backend().created(), 1);
}

#[test]
fn rebuild_after_dirty_picks_up_new_geometry() {
    let mut f = fixture(2);
    let b1 = f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();
    assert_eq!(f.cache.batch(b1).unwrap().vertex_count(), 6);

    set_geometry(&mut f, 4);
    f.cache
        .mark_dirty(f.scene.metaball_mut(f.mb).unwrap(), BatchDirtyMode::All);
    let b2 = f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();

    assert_ne!(b1, b2);
    assert!(f.cache.batch(b1).is_none());
    let batch = f.cache.batch(b2).unwrap();
    assert_eq!(batch.vertex_count(), 12);
    assert_eq!(batch.triangle_count(), 4);
    assert!(!f
        .cache
        .entry(f.scene.metaball(f.mb).unwrap())
        .unwrap()
        .is_dirty());
    assert_eq!(f.cache.backend().live(), 1);
}

#[test]
fn geometry_edits_without_dirty_flag_are_not_seen() {
    let mut f = fixture(2);
    let b1 = f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();
    set_geometry(&mut f, 4);
    let b2 = f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();
    assert_eq!(b1, b2);
    assert_eq!(f.cache.batch(b2).unwrap().triangle_count(), 2);
}

#[test]
fn free_is_idempotent() {
    let mut f = fixture(2);
    f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();

    free(&mut f);
    free(&mut f);

    assert!(f.cache.is_empty());
    assert_eq!(f.cache.backend().live(), 0);
    assert_eq!(f.cache.stats().frees, 1);
    assert!(f.scene.metaball(f.mb).unwrap().batch_cache().is_none());
}

#[test]
fn free_without_entry_is_a_no_op() {
    let mut f = fixture(2);
    free(&mut f);
    assert_eq!(f.cache.stats().frees, 0);
}

#[test]
fn lookup_after_free_rebuilds_from_scratch() {
    let mut f = fixture(3);
    let before = f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();
    free(&mut f);

    let after = f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();
    assert_ne!(before, after);
    assert_eq!(f.cache.batch(after).unwrap().triangle_count(), 3);
    assert_eq!(f.cache.backend().created(), 2);
    assert_eq!(f.cache.backend().live(), 1);
    assert_eq!(f.cache.len(), 1);
}

#[test]
fn dirty_then_free_releases_stale_batch() {
    let mut f = fixture(2);
    f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();
    f.cache
        .mark_dirty(f.scene.metaball_mut(f.mb).unwrap(), BatchDirtyMode::All);
    free(&mut f);
    assert_eq!(f.cache.backend().live(), 0);
}

#[test]
fn family_members_share_one_entry() {
    let mut f = fixture(2);
    f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();
    f.cache.get_surface_batch(&mut f.scene, f.member);
    assert_eq!(f.cache.len(), 1);
    assert_eq!(f.scene.find_basis(f.member), Some(f.basis));
}

#[test]
fn free_all_tears_down_every_datablock() {
    let mut f = fixture(2);
    let other = f.scene.add_metaball(MetaBall::new("Blob"));
    let disp = primitives::octahedron(1.0).unwrap();
    let blob = f
        .scene
        .add_object(Object::new("Blob", other).with_curve_cache(CurveCache::new(disp)));

    f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();
    let octa = f.cache.get_surface_batch(&mut f.scene, blob).unwrap();
    assert_eq!(f.cache.batch(octa).unwrap().triangle_count(), 8);
    assert_eq!(f.cache.backend().live(), 2);

    f.cache.free_all(&mut f.scene);
    assert!(f.cache.is_empty());
    assert_eq!(f.cache.backend().live(), 0);
}

#[test]
fn unresolved_object_handle_yields_none() {
    let mut f = fixture(2);
    let gone = f.scene.add_object(Object::new("Temp", f.mb));
    f.scene.objects.remove(gone);
    assert!(f.cache.get_surface_batch(&mut f.scene, gone).is_none());
}

#[test]
fn separate_caches_keep_their_own_geometry() {
    let mut scene = Scene::new();
    let mb_a = scene.add_metaball(MetaBall::new("A"));
    let a = scene.add_object(
        Object::new("A", mb_a).with_curve_cache(CurveCache::new(primitives::triangle_strip(2).unwrap())),
    );
    let mb_b = scene.add_metaball(MetaBall::new("B"));
    let b = scene.add_object(
        Object::new("B", mb_b).with_curve_cache(CurveCache::new(primitives::triangle_strip(7).unwrap())),
    );
    let mut c1 = MetaBallDrawCache::new(CpuBackend::new());
    let mut c2 = MetaBallDrawCache::new(CpuBackend::new());

    let k1 = c1.get_surface_batch(&mut scene, a).unwrap();
    assert_eq!(c1.batch(k1).unwrap().triangle_count(), 2);
    let k2 = c2.get_surface_batch(&mut scene, b).unwrap();
    assert_eq!(c2.batch(k2).unwrap().triangle_count(), 7);

    // c2 must not resolve c1's key against its own batches
    let taken = c2.get_surface_batch(&mut scene, a).unwrap();
    assert_eq!(c2.batch(taken).unwrap().triangle_count(), 2);
    assert_eq!(c2.backend().live(), 2);
    assert!(c1.entry(scene.metaball(mb_a).unwrap()).is_none());
    assert_eq!(
        c2.entry(scene.metaball(mb_a).unwrap()).unwrap().owner(),
        c2.id()
    );

    let again = c1.get_surface_batch(&mut scene, a).unwrap();
    assert_eq!(c1.batch(again).unwrap().triangle_count(), 2);

    // Frees only what c1 owns, plus the batch it lost to c2 earlier
    c1.free_all(&mut scene);
    assert_eq!(c1.backend().live(), 0);
    assert!(c2.entry(scene.metaball(mb_b).unwrap()).is_some());

    c2.free_all(&mut scene);
    assert_eq!(c2.backend().live(), 0);
}

#[test]
fn free_leaves_foreign_entry_alone() {
    let mut f = fixture(2);
    let mut other = MetaBallDrawCache::new(CpuBackend::new());
    f.cache.get_surface_batch(&mut f.scene, f.basis).unwrap();

    other.free(f.scene.metaball_mut(f.mb).unwrap());

    assert_eq!(other.stats().frees, 0);
    assert!(f.cache.entry(f.scene.metaball(f.mb).unwrap()).is_some());
    assert_eq!(f.cache.backend().live(), 1);
}
