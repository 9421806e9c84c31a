//! Integration tests for destination filename assignment

use chrono::{TimeZone, Utc};
use photos_export::adapters::ContentTypeTable;
use photos_export::core::naming::{
    hash64, letter_from_hash, resource_seed, FilenameAssigner, NameRegistry,
};
use photos_export::core::timestamp::CaptureStamp;
use photos_export::domain::{Asset, AssetId, MediaKind, Resource, ResourceKind};
use test_case::test_case;

fn stamp() -> CaptureStamp {
    CaptureStamp::from_datetime(&Utc.with_ymd_and_hms(2023, 11, 5, 18, 30, 0).unwrap())
}

fn live_photo() -> Asset {
    Asset::builder()
        .id(AssetId::new("B84E8479-475C-4727-A4A4-B77AA9980897/L0/001").unwrap())
        .media_kind(MediaKind::Image)
        .media_subtypes(8)
        .pixel_size(4032, 3024)
        .resource(Resource::new(ResourceKind::Photo, "IMG_4242.HEIC", "public.heic"))
        .resource(Resource::new(
            ResourceKind::Video,
            "IMG_4242.MOV",
            "com.apple.quicktime-movie",
        ))
        .resource(Resource::new(ResourceKind::FullSizePhoto, "IMG_4242.HEIC", "public.heic"))
        .resource(Resource::new(ResourceKind::AdjustmentData, "", "com.apple.adjustment"))
        .build()
        .unwrap()
}

fn assign_all(asset: &Asset) -> Vec<String> {
    let table = ContentTypeTable::new();
    let assigner = FilenameAssigner::new(&table);
    let mut registry = NameRegistry::new();
    asset
        .resources
        .iter()
        .map(|r| {
            assigner.assign(
                &stamp(),
                &r.original_filename,
                &resource_seed(asset, r),
                &r.content_type,
                &mut registry,
            )
        })
        .collect()
}

#[test]
fn test_names_within_asset_are_unique() {
    let names = assign_all(&live_photo());
    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn test_first_resource_of_each_extension_gets_base_name() {
    let names = assign_all(&live_photo());
    assert_eq!(names[0], "20231105183000.heic");
    assert_eq!(names[1], "20231105183000.mov");
}

#[test]
fn test_collision_appends_hash_letter() {
    let asset = live_photo();
    let names = assign_all(&asset);
    let seed = format!("IMG_4242.HEIC|{}", resource_seed(&asset, &asset.resources[2]));
    let expected = letter_from_hash(hash64(&seed), 0);
    assert_eq!(names[2], format!("20231105183000{expected}.heic"));
}

#[test]
fn test_assignment_is_deterministic() {
    assert_eq!(assign_all(&live_photo()), assign_all(&live_photo()));
}

#[test]
fn test_registry_is_per_asset() {
    let first = assign_all(&live_photo());
    let second = assign_all(&live_photo());
    assert_eq!(first[0], second[0]);
}

#[test_case("photo.JPEG", "public.jpeg", "20231105183000.jpeg" ; "original extension lowercased")]
#[test_case("", "public.jpeg", "20231105183000.jpg" ; "content type fallback")]
#[test_case("", "image/png", "20231105183000.png" ; "mime content type")]
#[test_case("README", "com.example.unknown", "20231105183000" ; "no extension at all")]
fn test_extension_rules(original: &str, content_type: &str, expected: &str) {
    let table = ContentTypeTable::new();
    let name = FilenameAssigner::new(&table).assign(
        &stamp(),
        original,
        "seed",
        content_type,
        &mut NameRegistry::new(),
    );
    assert_eq!(name, expected);
}

#[test]
fn test_many_same_second_resources_stay_unique() {
    let table = ContentTypeTable::new();
    let assigner = FilenameAssigner::new(&table);
    let mut registry = NameRegistry::new();

    let names: Vec<String> = (0..60)
        .map(|_| assigner.assign(&stamp(), "BURST.JPG", "seed", "public.jpeg", &mut registry))
        .collect();

    assert_eq!(registry.len(), 60);
    assert!(names.iter().all(|n| n.ends_with(".jpg")));
}

#[test_case("audio/mpeg", "20231105183000.mp3")]
#[test_case("video/mpeg", "20231105183000.mpg")]
#[test_case("audio/mp4", "20231105183000.m4a")]
#[test_case("image/tiff", "20231105183000.tiff")]
fn test_unnamed_resource_uses_preferred_mime_extension(content_type: &str, expected: &str) {
    let table = ContentTypeTable::new();
    let assigner = FilenameAssigner::new(&table);
    let name = assigner.assign(&stamp(), "", "seed", content_type, &mut NameRegistry::new());
    assert_eq!(name, expected);
}
