//! Plantillas HTML/SVG de los correos, embebidas en el binario.
//!
//! Todo valor interpolado pasa por el escape HTML de minijinja; sólo el
//! base64 del gráfico entra con `|safe`.
use minijinja::{AutoEscape, Environment};
use serde::Serialize;

pub const NOTIFICATION: &str = "notification.html";
pub const REPORT: &str = "report.html";
pub const CHART: &str = "chart.svg";

const SOURCES: [(&str, &str); 3] = [(NOTIFICATION, include_str!("../templates/notification.html")),
                                    (REPORT, include_str!("../templates/report.html")),
                                    (CHART, include_str!("../templates/chart.svg"))];

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|name| {
           if name.ends_with(".html") || name.ends_with(".svg") {
               AutoEscape::Html
           } else {
               AutoEscape::None
           }
       });
    for (name, source) in SOURCES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

pub fn render<T: Serialize>(template_name: &str, context: T) -> Result<String, minijinja::Error> {
    let env = environment()?;
    env.get_template(template_name).and_then(|tmpl| tmpl.render(context))
}
