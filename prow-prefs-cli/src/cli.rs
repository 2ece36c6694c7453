//! Command line interface for prow-prefs storage images

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prow_prefs::{
    ExtendedSettings, Layout, NOR_FLASH_SECTOR_SIZE, Preferences, PreferencesStore, PrefsError,
    ProfileData, SUCCESS_CODE, StorageBackend, error_code_to_str,
};

use crate::image::{ImageFile, MediumKind};

type ImageStore = PreferencesStore<ImageFile, Vec<ProfileData>>;

#[derive(Parser, Debug)]
#[command(name = "prow-prefs")]
#[command(about = "Inspect and provision prow-prefs storage images", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Storage image file (a dump of the EEPROM or flash sector)
    #[arg(short, long, global = true, default_value = "prefs.bin")]
    pub image: PathBuf,

    /// Medium the image emulates
    #[arg(short, long, global = true, value_enum, default_value_t = MediumKind::Eeprom)]
    pub medium: MediumKind,

    /// Number of calibration profiles in the record
    #[arg(short = 'n', long, global = true, default_value_t = 4,
          value_parser = clap::value_parser!(u8).range(1..))]
    pub profiles: u8,

    /// The record carries the extended settings block
    #[arg(short, long, global = true)]
    pub extended: bool,

    /// Size of a newly created image in bytes
    #[arg(long, global = true, default_value_t = NOR_FLASH_SECTOR_SIZE as usize)]
    pub region_size: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the bytes the record occupies
    Size,

    /// Create the image and save default profiles
    Init,

    /// Print the saved record
    Show,

    /// Change the selected profile
    Select {
        /// Profile index
        index: u8,
    },

    /// Wipe the image
    Reset,

    /// Print the error code table
    Errors,
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    execute(&cli, &mut stdout.lock())
}

/// Run one command, writing its report to `out`
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Commands::Size => {
            let layout = Layout::new(cli.profiles as usize, cli.extended);
            writeln!(out, "{}", layout.required_size())?;
        }
        Commands::Init => {
            let image = ImageFile::create(&cli.image, cli.medium, cli.region_size)
                .with_context(|| format!("Failed to create {}", cli.image.display()))?;
            let mut store = store(cli, image);
            store.save().context("Failed to save default profiles")?;
            if cli.extended {
                store
                    .save_extended(&ExtendedSettings::default())
                    .context("Failed to save extended settings")?;
            }
            writeln!(
                out,
                "Initialized {} ({} profiles, {} bytes used)",
                cli.image.display(),
                cli.profiles,
                store.required_size()
            )?;
        }
        Commands::Show => {
            let mut store = open(cli)?;
            match store.load() {
                Ok(()) => {}
                Err(PrefsError::NoData) => {
                    writeln!(out, "{}", PrefsError::NoData)?;
                    return Ok(());
                }
                Err(e) => return Err(e).context("Failed to load preferences"),
            }
            print_record(store.preferences(), out)?;
            if cli.extended {
                let block = store
                    .load_extended()
                    .context("Failed to load extended settings")?;
                print_extended(&block, out)?;
            }
        }
        Commands::Select { index } => {
            if *index >= cli.profiles {
                anyhow::bail!("Profile {} out of range (0..{})", index, cli.profiles);
            }
            let mut store = open(cli)?;
            store.load().context("Failed to load preferences")?;
            store.preferences_mut().set_profile(*index);
            store.save().context("Failed to save preferences")?;
            writeln!(out, "Selected profile {}", index)?;
        }
        Commands::Reset => {
            let mut store = open(cli)?;
            store.reset().context("Failed to reset image")?;
            writeln!(out, "Reset {}", cli.image.display())?;
        }
        Commands::Errors => {
            writeln!(out, "{:>4}  {}", SUCCESS_CODE, error_code_to_str(SUCCESS_CODE))?;
            for code in (-5..=-1).rev() {
                writeln!(out, "{:>4}  {}", code, error_code_to_str(code))?;
            }
        }
    }
    Ok(())
}

fn store(cli: &Cli, image: ImageFile) -> ImageStore {
    let prefs = Preferences::with_count(cli.profiles as usize);
    if cli.extended {
        PreferencesStore::with_extended(image, prefs)
    } else {
        PreferencesStore::new(image, prefs)
    }
}

fn open(cli: &Cli) -> Result<ImageStore> {
    let image = ImageFile::open(&cli.image, cli.medium)
        .with_context(|| format!("Failed to open {}", cli.image.display()))?;
    log::debug!("opened {:?} image of {} bytes", image.kind(), image.capacity());
    Ok(store(cli, image))
}

fn print_record(prefs: &Preferences<Vec<ProfileData>>, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Selected profile: {}", prefs.profile())?;
    if !prefs.profile_in_range() {
        writeln!(out, "  (index is past the last profile)")?;
    }
    for (i, p) in prefs.profiles().iter().enumerate() {
        let marker = if i == prefs.profile() as usize { '*' } else { ' ' };
        writeln!(
            out,
            "{} {:>3}: scale {:.3} x {:.3}  center ({}, {})  ir {}  mode {}",
            marker,
            i,
            p.x_scale_f32(),
            p.y_scale_f32(),
            p.x_center(),
            p.y_center(),
            p.ir_sensitivity(),
            p.run_mode()
        )?;
    }
    Ok(())
}

fn print_extended(block: &ExtendedSettings, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Toggles: {:#010b}", block.bools)?;
    match block.custom_pins() {
        Some(pins) => writeln!(out, "Custom pins: {:?}", pins)?,
        None => writeln!(out, "Custom pins: off")?,
    }
    writeln!(out, "Settings: {:?}", block.settings)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli(dir: &TempDir, medium: MediumKind, extended: bool, command: Commands) -> Cli {
        Cli {
            image: dir.path().join("prefs.bin"),
            medium,
            profiles: 4,
            extended,
            region_size: 256,
            command,
        }
    }

    fn output(cli: &Cli) -> String {
        let mut out = Vec::new();
        execute(cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_size() {
        let dir = TempDir::new().unwrap();
        assert_eq!(output(&cli(&dir, MediumKind::Eeprom, false, Commands::Size)), "69\n");
        assert_eq!(output(&cli(&dir, MediumKind::Eeprom, true, Commands::Size)), "113\n");
    }

    #[test]
    fn test_init_select_show_on_both_media() {
        for medium in [MediumKind::Eeprom, MediumKind::Flash] {
            let dir = TempDir::new().unwrap();
            output(&cli(&dir, medium, true, Commands::Init));
            output(&cli(&dir, medium, true, Commands::Select { index: 2 }));

            let shown = output(&cli(&dir, medium, true, Commands::Show));
            assert!(shown.starts_with("Selected profile: 2\n"), "{medium:?}: {shown}");
            assert!(shown.contains("*   2:"));
            assert!(shown.contains("Custom pins: off"));
        }
    }

    #[test]
    fn test_show_blank_image_reports_no_data() {
        let dir = TempDir::new().unwrap();
        let c = cli(&dir, MediumKind::Flash, false, Commands::Show);
        ImageFile::create(&c.image, MediumKind::Flash, 256).unwrap();
        assert_eq!(output(&c), "No preferences saved\n");
    }

    #[test]
    fn test_reset_erases_record() {
        let dir = TempDir::new().unwrap();
        output(&cli(&dir, MediumKind::Eeprom, false, Commands::Init));
        output(&cli(&dir, MediumKind::Eeprom, false, Commands::Reset));

        let bytes = std::fs::read(dir.path().join("prefs.bin")).unwrap();
        assert!(bytes.iter().all(|&b| b == 0));
        assert_eq!(
            output(&cli(&dir, MediumKind::Eeprom, false, Commands::Show)),
            "No preferences saved\n"
        );
    }

    #[test]
    fn test_select_out_of_range() {
        let dir = TempDir::new().unwrap();
        output(&cli(&dir, MediumKind::Eeprom, false, Commands::Init));
        let mut out = Vec::new();
        let err = execute(&cli(&dir, MediumKind::Eeprom, false, Commands::Select { index: 4 }), &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_missing_image() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let err = execute(&cli(&dir, MediumKind::Eeprom, false, Commands::Show), &mut out).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open"));
    }

    #[test]
    fn test_error_table() {
        let dir = TempDir::new().unwrap();
        let table = output(&cli(&dir, MediumKind::Eeprom, false, Commands::Errors));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "   0  Success");
        assert_eq!(lines[3], "  -3  No preferences saved");
        assert_eq!(lines[5], "  -5  Erase failed");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["prow-prefs", "select", "3", "-m", "flash", "-n", "8", "--extended"]).unwrap();
        assert!(matches!(cli.command, Commands::Select { index: 3 }));
        assert_eq!(cli.medium, MediumKind::Flash);
        assert_eq!(cli.profiles, 8);
        assert!(cli.extended);

        assert!(Cli::try_parse_from(["prow-prefs", "-n", "0", "size"]).is_err());
    }
}
