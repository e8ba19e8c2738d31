// Renders one frame without a window and writes it to voxelspace_frame.png.
//
//   cargo run -p voxelspace --example render_png                  # generated terrain
//   cargo run -p voxelspace --example render_png -- D1.png C1W.png
use std::path::Path;

use voxelspace::{Framebuffer, Intents, Scene, SceneConfig, loader, synth};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let terrain = match args.as_slice() {
        [height_map, color_map] => loader::load_terrain_or_empty(height_map, color_map),
        _ => synth::generate(1024, 2025, 0.55),
    };

    let config = SceneConfig::default();
    let mut frame = Framebuffer::new(config.screen.width as usize, config.screen.height as usize);
    let mut scene = Scene::new(terrain, config);

    // Glide forward a little so the first frame is not straight over the center
    let forward = Intents {
        forward: true,
        pitch_down: true,
        ..Default::default()
    };
    for _ in 0..20 {
        scene.update(forward);
    }
    scene.render_frame(&mut frame);

    let path = Path::new("voxelspace_frame.png");
    match frame.save_png(path) {
        Ok(()) => println!("Saved frame to {:?}", path),
        Err(err) => eprintln!("Could not save {:?}: {}", path, err),
    }
}
