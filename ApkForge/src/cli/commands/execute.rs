//! Command execution implementations

use std::path::Path;

use super::{Commands, ConvertCommands};
use super::{convert, sign, tools};
use crate::config::ToolchainConfig;
use crate::converter::Converter;
use crate::toolchain::Toolchain;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or the
    /// underlying conversion fails.
    pub fn execute(&self, config_path: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
        let config = ToolchainConfig::discover(config_path)?;
        match self {
            Commands::Tools { print_config } => tools::execute(&config, *print_config),
            Commands::Convert(command) => {
                let toolchain = Toolchain::initialize(&config)?;
                command.execute(&Converter::new(&toolchain), quiet)
            }
        }
    }
}

impl ConvertCommands {
    /// Run the selected conversion.
    ///
    /// # Errors
    /// Returns an error if the conversion fails.
    pub fn execute(&self, converter: &Converter<'_>, quiet: bool) -> anyhow::Result<()> {
        match self {
            ConvertCommands::Decompile { apk, output } => convert::run(quiet, "Decoding", apk, output, || {
                converter.decompile(apk, output)
            }),
            ConvertCommands::Build { folder, output } => {
                let built = convert::run_with(quiet, "Building", folder, || {
                    converter.recompile(folder, output.as_deref())
                })?;
                convert::report_output(quiet, &built);
                Ok(())
            }
            ConvertCommands::ClassToDex { source, output } => convert::run(quiet, "Dexing", source, output, || {
                converter.class_to_dex(source, output)
            }),
            ConvertCommands::DexToSmali { source, output } => {
                convert::run(quiet, "Disassembling", source, output, || {
                    converter.dex_to_smali(source, output)
                })
            }
            ConvertCommands::ClassToSmali { source, output } => {
                convert::run(quiet, "Converting", source, output, || {
                    converter.class_to_smali(source, output)
                })
            }
            ConvertCommands::JarToSmali { jar, output } => convert::run(quiet, "Converting", jar, output, || {
                converter.jar_to_smali(jar, output)
            }),
            ConvertCommands::SmaliToDex { source, output } => {
                convert::run(quiet, "Assembling", source, output, || {
                    converter.smali_to_dex(source, output)
                })
            }
            ConvertCommands::DexToJar { source, output } => convert::run(quiet, "Translating", source, output, || {
                converter.dex_to_jar(source, output)
            }),
            ConvertCommands::JarToDex { jar, output } => convert::run(quiet, "Translating", jar, output, || {
                converter.jar_to_dex(jar, output)
            }),
            ConvertCommands::ApkToZip { apk, output } => convert::run(quiet, "Repacking", apk, output, || {
                converter.apk_to_zip(apk, output)
            }),
            ConvertCommands::Sign {
                apk,
                keystore_config,
                keystore,
                storepass,
                alias,
                keypass,
            } => {
                let credentials = sign::credentials(
                    keystore_config.as_deref(),
                    keystore.as_deref(),
                    storepass.as_deref(),
                    alias.as_deref(),
                    keypass.as_deref(),
                )?;
                let signed = convert::run_with(quiet, "Signing", apk, || {
                    converter.sign_apk(apk, &credentials)
                })?;
                convert::report_output(quiet, &signed);
                Ok(())
            }
            ConvertCommands::InstallFramework { apk } => convert::run_with(quiet, "Installing framework", apk, || {
                converter.install_framework(apk)
            }),
        }
    }
}
