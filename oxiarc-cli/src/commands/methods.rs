//! Methods command implementation.

use oxiarc_archive::zip::MethodRegistry;

pub fn cmd_methods() -> Result<(), Box<dyn std::error::Error>> {
    let registry = MethodRegistry::new();

    println!("{:>4}  {:<10}  {:>7}  {:>10}", "ID", "Name", "Version", "Read size");
    println!("{}", "-".repeat(37));

    for spec in registry.methods() {
        let version = spec.version_needed;
        println!(
            "{:>4}  {:<10}  {:>5}.{}  {:>10}",
            spec.id(),
            spec.name(),
            version / 10,
            version % 10,
            registry.min_read_size(spec.id())?
        );
    }

    Ok(())
}
