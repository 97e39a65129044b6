//! Face visibility across chunk seams must not depend on load order.

use std::collections::BTreeSet;

use lantern_assets::{FaceKind, TextureLibrary};
use lantern_config::{BiomeThreshold, TerrainSection};
use lantern_coords::{ChunkCoord, IsoProjector, TileCoord};
use lantern_terrain::{Biome, TerrainClassifier, TerrainConfig, TileType};
use lantern_world::{Chunk, ChunkManager, FaceRenderer, LoadedNeighbors, WorldSettings};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;

const N: u32 = 8;

type FaceSet = BTreeSet<(TileCoord, FaceKind)>;

fn classifier(section: &TerrainSection, seed: u64) -> TerrainClassifier {
    TerrainClassifier::new(TerrainConfig::from_section(section, seed).unwrap()).unwrap()
}

fn renderer() -> FaceRenderer {
    FaceRenderer::new(Box::new(TextureLibrary::new()), TileType::new("red_grass_block"))
}

fn faces_of(chunk: &Chunk) -> FaceSet {
    chunk
        .tiles()
        .flat_map(|t| t.faces().iter().map(|f| (f.tile, f.kind)))
        .collect()
}

/// Loads `order` one chunk at a time, recomputing all faces after each,
/// and returns the final face set.
fn load_in_order(terrain: &TerrainClassifier, order: &[ChunkCoord]) -> FaceSet {
    let projector = IsoProjector::default();
    let mut faces = renderer();
    let mut chunks: FxHashMap<ChunkCoord, Chunk> = FxHashMap::default();

    for &coord in order {
        let mut chunk = Chunk::new(coord, N);
        chunk.generate(terrain, &projector);
        chunks.insert(coord, chunk);

        let live: Vec<ChunkCoord> = chunks.keys().copied().collect();
        for c in live {
            let mut chunk = chunks.remove(&c).unwrap();
            chunk.compute_faces(&LoadedNeighbors::new(&chunks, terrain, N), &mut faces);
            chunks.insert(c, chunk);
        }
    }
    chunks.values().flat_map(faces_of).collect()
}

#[test]
fn permuted_load_orders_give_identical_faces() {
    let terrain = classifier(&TerrainSection::default(), 42);
    let mut order: Vec<ChunkCoord> = ChunkCoord::new(0, 0).square(1).collect();
    let reference = load_in_order(&terrain, &order);

    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    for _ in 0..12 {
        order.shuffle(&mut rng);
        assert_eq!(load_in_order(&terrain, &order), reference, "order {order:?}");
    }
}

#[test]
fn lone_chunk_matches_chunk_with_loaded_neighbours() {
    let terrain = classifier(&TerrainSection::default(), 42);
    let projector = IsoProjector::default();
    let center = ChunkCoord::new(0, 0);

    let mut lone = Chunk::new(center, N);
    lone.generate(&terrain, &projector);
    lone.compute_faces(&|c: TileCoord| terrain.tile_exists_at(c), &mut renderer());

    let all = load_in_order(&terrain, &center.square(1).collect::<Vec<_>>());
    let in_context: FaceSet = all
        .into_iter()
        .filter(|(tile, _)| tile.chunk(N) == center)
        .collect();

    assert_eq!(faces_of(&lone), in_context);
}

#[test]
fn different_walks_settle_on_the_same_faces() {
    let build = || {
        let settings = WorldSettings {
            chunk_size: N,
            render_distance: 1,
            ..Default::default()
        };
        ChunkManager::new(
            settings,
            classifier(&TerrainSection::default(), 5),
            Box::new(TextureLibrary::new()),
        )
        .unwrap()
    };
    let snapshot = |m: &ChunkManager| -> FaceSet {
        m.loaded_chunks()
            .into_iter()
            .flat_map(|c| faces_of(m.chunk(c).unwrap()))
            .collect()
    };

    let mut direct = build();
    direct.update(direct.projector().cart_to_iso(20.0, 20.0));

    let mut detour = build();
    for (x, y) in [(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (12.0, 28.0), (20.0, 20.0)] {
        detour.update(detour.projector().cart_to_iso(x, y));
    }

    assert_eq!(direct.loaded_chunks(), detour.loaded_chunks());
    assert_eq!(snapshot(&direct), snapshot(&detour));
}

/// Water below zero, grass above, so both seam cases are easy to find.
fn two_biome_section() -> TerrainSection {
    TerrainSection {
        thresholds: vec![
            BiomeThreshold {
                biome: "deep_water".into(),
                below: 0.0,
            },
            BiomeThreshold {
                biome: "grass".into(),
                below: 1.0,
            },
        ],
        ..Default::default()
    }
}

/// A grass tile on a chunk's east edge whose east neighbour has `east` biome.
fn find_east_edge(terrain: &TerrainClassifier, east: Biome) -> TileCoord {
    (-500..500)
        .flat_map(|cx| (0..N as i32).map(move |y| TileCoord::new(cx * N as i32 + N as i32 - 1, y)))
        .find(|t| terrain.biome_at(*t) == Biome::Grass && terrain.biome_at(t.east()) == east)
        .expect("no qualifying seam tile in search range")
}

fn manager_at(tile: TileCoord) -> ChunkManager {
    let settings = WorldSettings {
        chunk_size: N,
        render_distance: 1,
        ..Default::default()
    };
    let mut m = ChunkManager::new(
        settings,
        classifier(&two_biome_section(), 42),
        Box::new(TextureLibrary::new()),
    )
    .unwrap();
    let pos = m
        .projector()
        .cart_to_iso(f64::from(tile.x) + 0.5, f64::from(tile.y) + 0.5);
    m.update(pos);
    m
}

/// Viewer one chunk west of `tile`, so `tile` sits on the east rim of the
/// loaded square and its east neighbour's chunk stays unloaded.
fn manager_west_of(tile: TileCoord) -> ChunkManager {
    manager_at(TileCoord::new(tile.x - N as i32, tile.y))
}

#[test]
fn predicted_water_east_of_seam_exposes_right_face() {
    let terrain = classifier(&two_biome_section(), 42);
    let tile = find_east_edge(&terrain, Biome::DeepWater);

    let alone = manager_west_of(tile);
    assert!(alone.get_tile_at(tile.east()).is_none(), "east chunk must be unloaded");
    assert!(alone.get_tile_at(tile).unwrap().has_face(FaceKind::Right));

    let surrounded = manager_at(tile);
    let east = surrounded.get_tile_at(tile.east()).unwrap();
    assert!(!east.solid);
    assert!(surrounded.get_tile_at(tile).unwrap().has_face(FaceKind::Right));
}

#[test]
fn predicted_grass_east_of_seam_hides_right_face() {
    let terrain = classifier(&two_biome_section(), 42);
    let tile = find_east_edge(&terrain, Biome::Grass);

    let alone = manager_west_of(tile);
    assert!(alone.get_tile_at(tile.east()).is_none());
    assert!(!alone.get_tile_at(tile).unwrap().has_face(FaceKind::Right));

    let surrounded = manager_at(tile);
    assert!(!surrounded.get_tile_at(tile).unwrap().has_face(FaceKind::Right));
}

#[test]
fn open_tiles_only_show_a_top() {
    let terrain = classifier(&two_biome_section(), 42);
    let water = find_east_edge(&terrain, Biome::DeepWater).east();
    let m = manager_at(water);
    assert!(!m.get_tile_at(water).unwrap().solid);
    for coord in m.loaded_chunks() {
        for tile in m.chunk(coord).unwrap().tiles().filter(|t| !t.solid) {
            assert!(tile.has_face(FaceKind::Top));
            assert_eq!(tile.face_count(), 1);
        }
    }
}
