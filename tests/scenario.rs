//! End-to-end scenario tests: decoded raster frames and JSON-serialized
//! numeric grids through every builder.

use image::RgbaImage;
use relief::data::ScenarioSource;
use relief::geometry::{
    depth_relief, filtered_depth_morph, image_gallery, packed_color_morph, textured_plane,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A width x height RGBA frame where every pixel carries the same value in
/// all channels, the way depth maps encode intensity redundantly.
fn uniform_frame(width: u32, height: u32, value: u8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, image::Rgba([value, value, value, 255]))
}

fn json_scenario() -> ScenarioSource {
    let color = serde_json::json!([
        [[200, 40, 40], [40, 200, 40]],
        [[40, 40, 200], [200, 200, 40]]
    ])
    .to_string();
    let depth = serde_json::json!([[0, 50], [50, 50]]).to_string();
    ScenarioSource::from_json(&[&color, &depth]).unwrap()
}

#[test]
fn raster_scenario_builds_every_point_cloud_kind() {
    init_tracing();

    let color = uniform_frame(4, 3, 128);
    let depth = uniform_frame(4, 3, 60);
    let source = ScenarioSource::from_images(vec![color.clone(), depth.clone()]);

    let relief = depth_relief(&source).unwrap();
    assert_eq!(relief.buffer.vertex_count(), 12);
    assert_eq!(relief.buffer.morph_targets.len(), 2);

    let morph = packed_color_morph(
        &ScenarioSource::from_images(vec![
            color.clone(),
            depth.clone(),
            uniform_frame(4, 3, 10),
            uniform_frame(4, 3, 20),
        ]),
        2,
    )
    .unwrap();
    assert_eq!(morph.vertex_count(), 12);
    assert_eq!(morph.morph_targets.len(), 3);

    let filtered = filtered_depth_morph(
        &ScenarioSource::from_images(vec![
            color.clone(),
            depth.clone(),
            color.clone(),
            depth.clone(),
            uniform_frame(4, 3, 30),
            uniform_frame(4, 3, 90),
        ]),
        1,
    )
    .unwrap();
    assert_eq!(filtered.vertex_count(), 12);
    assert_eq!(filtered.morph_targets.len(), 2);
    // uniform raster depth 60 survives the filter: z = 10 - 60/20
    assert_eq!(filtered.positions[2], 10.0 - 60.0 / 20.0);
}

#[test]
fn raster_gallery_pads_mixed_sizes() {
    init_tracing();

    let source = ScenarioSource::from_images(vec![
        uniform_frame(4, 4, 100),
        uniform_frame(4, 4, 50),
        uniform_frame(2, 2, 200),
        uniform_frame(2, 2, 25),
    ]);

    let gallery = image_gallery(&source).unwrap();
    assert_eq!(gallery.buffer.vertex_count(), 16);
    assert_eq!(gallery.buffer.morph_targets.len(), 1);
    assert_eq!(
        gallery.buffer.morph_targets[0].vertex_count(),
        gallery.buffer.vertex_count()
    );
    assert_eq!(gallery.center_points.len(), 2);
}

#[test]
fn json_scenario_zero_depth_stays_flat_on_the_plane() {
    init_tracing();

    let plane = textured_plane(&json_scenario()).unwrap();
    assert_eq!(plane.buffer.vertex_count(), 4);

    // the zero depth sample short-circuits to z = 0
    assert_eq!(plane.buffer.z_at(0), 0.0);
    // the other three vertices carry scaled non-zero depth
    for vertex in 1..4 {
        assert!(plane.buffer.z_at(vertex) > 0.0);
    }
    assert_eq!(plane.min_z, 0.0);
}

#[test]
fn json_and_raster_encodings_agree_on_topology() {
    init_tracing();

    let from_json = depth_relief(&json_scenario()).unwrap();

    let color = uniform_frame(2, 2, 128);
    let depth = uniform_frame(2, 2, 60);
    let from_raster =
        depth_relief(&ScenarioSource::from_images(vec![color, depth])).unwrap();

    // same grid, same vertex layout, independent of the physical encoding
    assert_eq!(from_json.buffer.vertex_count(), from_raster.buffer.vertex_count());
    assert_eq!(
        from_json.buffer.positions[0..2],
        from_raster.buffer.positions[0..2]
    );
    assert_eq!(
        from_json.buffer.morph_targets.len(),
        from_raster.buffer.morph_targets.len()
    );
}

#[test]
fn builders_are_pure_functions_of_their_inputs() {
    init_tracing();

    let source = json_scenario();
    let a = textured_plane(&source).unwrap();
    let b = textured_plane(&source).unwrap();
    assert_eq!(a.buffer, b.buffer);

    let a = depth_relief(&source).unwrap();
    let b = depth_relief(&source).unwrap();
    assert_eq!(a.buffer, b.buffer);
    assert_eq!(a.center_points, b.center_points);
}
