use tabled::Table;

use crate::{info, recommend::PERSONAL_MIX, utils};

/// Lists the canonical genres and the searches each one expands to.
pub fn genres() {
    let table = Table::new(utils::genre_rows());
    println!("{}", table);
    info!(
        "Any other genre is searched verbatim. Use '{}' to derive genres from your listening history.",
        PERSONAL_MIX
    );
}
