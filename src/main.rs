use clap::Parser;
use mineral_catalog::{cli, config, convert, error, icons, scanner};
use mineral_catalog_common::stats::{count_by, format_amount, top_by, total_estimated_value};
use mineral_catalog_common::{load_catalog_file, FilterDimension};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load()?;

    match cli.command {
        Commands::Convert { input, output, no_backup } => {
            let input = input.unwrap_or_else(|| config.workbook.clone());
            let output = output.unwrap_or_else(|| config.dataset.clone());

            let report = convert::convert(&input, &output, !no_backup, config.top_countries)?;

            println!("\n{}", "-".repeat(60));
            println!("RESUMEN DE LA COLECCION");
            println!("{}", "-".repeat(60));
            println!("   Total de ejemplares: {}", report.records);
            println!("\n   Top {} paises:", config.top_countries);
            for (country, count) in &report.top_countries {
                println!("      - {}: {}", country, count);
            }
            if let Some(total) = report.total_value {
                println!("\n   Valor total estimado: {} EUR", format_amount(total));
            }

            println!("\n✅ Conversión completada");
        }

        Commands::Icons { source, output } => {
            let output_dir = output.unwrap_or_else(|| config.icons_dir.clone());
            println!("Generando iconos desde {}...", source.display());

            let generated = icons::generate_icons(&source, &output_dir)?;
            for path in &generated {
                println!("✔ {}", path.display());
            }

            println!("\n✅ {} iconos generados en {}", generated.len(), output_dir.display());
        }

        Commands::Stats { input, top } => {
            let input = input.unwrap_or_else(|| config.dataset.clone());
            let top = top.unwrap_or(config.top_countries);
            let records = load_catalog_file(&input)?;

            println!("Colección: {} ejemplares\n", records.len());

            println!("Top {} paises:", top);
            for (country, count) in top_by(&records, FilterDimension::Country, top) {
                println!("  {:<24} {:>4}", country, count);
            }

            println!("\nClases químicas:");
            for (class, count) in count_by(&records, FilterDimension::ChemicalClass) {
                println!("  {:<24} {:>4}", class, count);
            }

            println!("\nSistemas cristalinos:");
            for (system, count) in count_by(&records, FilterDimension::CrystalSystem) {
                println!("  {:<24} {:>4}", system, count);
            }

            match total_estimated_value(&records) {
                Some(total) => println!("\nValor total estimado: {} EUR", format_amount(total)),
                None => println!("\nValor total estimado: -"),
            }
        }

        Commands::Check { input, images } => {
            let input = input.unwrap_or_else(|| config.dataset.clone());
            let image_root = images.unwrap_or_else(|| config.image_root.clone());

            println!("[1/2] Leyendo catálogo...");
            let records = load_catalog_file(&input)?;
            println!("✔ {} ejemplares\n", records.len());

            println!("[2/2] Revisando imágenes en {}...", image_root.display());
            let audit = scanner::audit_images(&records, &image_root)?;

            for (count, records) in audit.gallery_sizes() {
                println!("  {} imágenes: {} ejemplares", count, records);
            }

            let missing: Vec<_> = audit.missing_cover().collect();
            if !missing.is_empty() {
                println!("\nSin imagen principal (1.jpg):");
                for record in &missing {
                    println!("  - {}", record.inventory_id);
                }
            }

            if !audit.orphan_folders.is_empty() {
                println!("\nCarpetas sin ejemplar en el catálogo:");
                for folder in &audit.orphan_folders {
                    println!("  - {}", folder.display());
                }
            }

            if missing.is_empty() && audit.orphan_folders.is_empty() {
                println!("\n✅ Todas las imágenes están en orden");
            } else {
                println!(
                    "\n⚠ {} sin imagen principal, {} carpetas huérfanas",
                    missing.len(),
                    audit.orphan_folders.len()
                );
            }
        }

        Commands::Config { set_dataset, set_workbook, set_images, show } => {
            let mut config = config;
            let changed = set_dataset.is_some() || set_workbook.is_some() || set_images.is_some();

            if let Some(path) = set_dataset {
                config.dataset = path;
            }
            if let Some(path) = set_workbook {
                config.workbook = path;
            }
            if let Some(path) = set_images {
                config.image_root = path;
            }
            if changed {
                config.save()?;
                println!("✔ Configuración guardada: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Configuración:");
                println!("  Catálogo JSON: {}", config.dataset.display());
                println!("  Libro Excel: {}", config.workbook.display());
                println!("  Imágenes: {}", config.image_root.display());
                println!("  Iconos: {}", config.icons_dir.display());
                println!("  Top paises: {}", config.top_countries);
            }
        }
    }

    Ok(())
}
