use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
      ____ _____ ___ _____ ____      _    ____ _____
     / ___| ____/ _ \_   _|  _ \    / \  / ___| ____|
    | |  _|  _|| | | || | | |_) |  / _ \| |   |  _|
    | |_| | |__| |_| || | |  _ <  / ___ \ |___| |___
     \____|_____\___/ |_| |_| \_\/_/   \_\____|_____|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_green().bold()));
    print::centerln(&format!(
        "{}",
        "IP and domain tracker with geolocation".italic().bright_black()
    ));
}
