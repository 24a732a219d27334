use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::Config;

lazy_static! {
    static ref ASSETS_RE: Regex = Regex::new(r#"@assets\(["'](.+?)["']\)"#).unwrap();
    static ref IMAGES_RE: Regex = Regex::new(r#"@images\(["'](.+?)["']\)"#).unwrap();
}

fn resolve(re: &Regex, content: &str, base: &str, sub_path: &str) -> String {
    re.replace_all(content, |caps: &Captures| {
        let path = caps[1].trim_start_matches('/');
        if sub_path.is_empty() {
            format!("{}/{}", base, path)
        } else {
            format!("{}/{}/{}", base, sub_path, path)
        }
    })
    .into_owned()
}

/// Turns `@assets('css/app.css')` into `<base url>/<PUBLIC_PATH>/css/app.css`
pub fn expand_assets(content: &str, config: &Config) -> String {
    resolve(&ASSETS_RE, content, &config.base_url(), config.public_path())
}

/// Turns `@images('logo.png')` into `<base url>/<IMAGES_PATH>/logo.png`
pub fn expand_images(content: &str, config: &Config) -> String {
    resolve(&IMAGES_RE, content, &config.base_url(), config.images_path())
}
