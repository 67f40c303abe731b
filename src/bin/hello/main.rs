use triangles::app::App;
use triangles::config::DemoConfig;
use triangles::logging::{init_logging, LoggingConfig};
use triangles::scene::Scene;

fn main() {
    init_logging(LoggingConfig::default());

    let app = match App::new(DemoConfig::hello()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Could not open window: {e}");
            std::process::exit(-1);
        }
    };

    let scene = match Scene::hello() {
        Ok(scene) => scene,
        Err(e) => {
            if !e.already_logged() {
                log::error!("Could not build scene: {e}");
            }
            std::process::exit(-1);
        }
    };

    app.run(scene)
}
