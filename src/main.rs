//! PINcredible demo entry point
//!
//! Builds one PIN table, seals it into a collection with a throwaway key and
//! reads it back. Set `RUST_LOG=debug` for the full trace.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("PINcredible (native) starting...");

    if let Err(e) = run() {
        log::error!("Cannot read/write your saved PINs: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on the web
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> pincredible::Result<()> {
    use pincredible::{ChaChaCipher, GridConfig, Pattern, PinCollection, PinTable};

    let config = GridConfig::default();
    let pattern = Pattern::generate(&config, &mut rand::rng());
    let mut table = PinTable::new(config, pattern)?;

    // The memorable part; everything else gets random digits
    for (column, digit) in [1, 9, 8, 4].into_iter().enumerate() {
        table.put(3, column as i32, digit)?;
    }
    table.fill();

    for row in 0..table.rows() as i32 {
        let line = (0..table.columns() as i32)
            .map(|column| table.get(row, column))
            .collect::<pincredible::Result<Vec<_>>>()?
            .join(" ");
        println!("{line}");
    }

    let (cipher, _key) = ChaChaCipher::generate();
    let mut collection = PinCollection::from_encrypted(&cipher, None)?;
    collection.insert_table(&table)?;
    let sealed = collection.to_encrypted(&cipher)?;

    for record in PinCollection::retrieve_pins(&cipher, Some(sealed.as_slice()))? {
        let restored = PinTable::from_data(config, record.as_bytes())?;
        log::info!(
            "Round trip {} ({} sealed bytes)",
            if restored == table { "ok" } else { "MISMATCH" },
            sealed.len()
        );
    }
    Ok(())
}
