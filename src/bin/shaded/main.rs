use triangles::app::App;
use triangles::config::DemoConfig;
use triangles::logging::{init_logging, LoggingConfig};
use triangles::scene::Scene;

fn main() {
    init_logging(LoggingConfig::default());

    let app = match App::new(DemoConfig::shaded()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Could not open window: {e}");
            std::process::exit(-1);
        }
    };

    let scene = match Scene::shaded() {
        Ok(scene) => scene,
        Err(e) => {
            if !e.already_logged() {
                log::error!("Could not build scene: {e}");
            }
            std::process::exit(-1);
        }
    };

    log::info!("Press K to increase color changing speed");
    log::info!("Press J to decrease color changing speed");

    app.run(scene)
}
