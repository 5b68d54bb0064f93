mod demo_scenes;

use mball_draw::renderer::{CpuBackend, WgpuBackend};
use mball_draw::settings::{BackendSetting, DrawCacheSettings};
use mball_draw::MetaBallDrawCache;

fn main() {
    mball_draw::init_logging();

    let settings = DrawCacheSettings::load();
    log::info!("Starting metaball draw cache demo ({:?} backend)", settings.backend);

    let gpu = match settings.backend {
        BackendSetting::Auto => {
            match pollster::block_on(WgpuBackend::headless(settings.power_preference.to_wgpu())) {
                Ok(backend) => Some(backend),
                Err(err) => {
                    log::warn!("{}. Falling back to the CPU backend.", err);
                    None
                }
            }
        }
        BackendSetting::Cpu => None,
    };

    let result = match gpu {
        Some(backend) => {
            demo_scenes::run_family_scene(&mut MetaBallDrawCache::with_settings(backend, &settings))
        }
        None => demo_scenes::run_family_scene(&mut MetaBallDrawCache::with_settings(
            CpuBackend::new(),
            &settings,
        )),
    };

    if let Err(err) = result {
        log::error!("Demo scene failed: {}", err);
        std::process::exit(1);
    }

    log::info!("Application shutdown complete");
}
