use clap::Subcommand;
use std::path::PathBuf;

pub mod convert;
pub mod execute;
pub mod sign;
pub mod tools;

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Convert(ConvertCommands),

    /// Show where each tool is expected and whether it was found
    Tools {
        /// Print the effective configuration as TOML instead
        #[arg(long)]
        print_config: bool,
    },
}

/// Subcommands that run a conversion against the configured toolchain.
#[derive(Subcommand)]
pub enum ConvertCommands {
    /// Decode an APK into a project directory (apktool d)
    Decompile {
        /// Source APK
        apk: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Rebuild a decoded project directory into an APK (apktool b)
    Build {
        /// Decoded project directory
        folder: PathBuf,

        /// Output APK (defaults to <folder>/dist/<apkFileName>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compile a class directory or jar to DEX (dx)
    #[command(name = "class2dex")]
    ClassToDex {
        /// Class directory or jar
        source: PathBuf,

        /// Output DEX file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Disassemble a DEX or APK to smali (baksmali)
    #[command(name = "dex2smali")]
    DexToSmali {
        /// DEX or APK file
        source: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a class directory or jar to smali (dx, then baksmali)
    #[command(name = "class2smali")]
    ClassToSmali {
        /// Class directory or jar
        source: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a jar to smali (dx, then baksmali)
    #[command(name = "jar2smali")]
    JarToSmali {
        /// Jar file
        jar: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Assemble a smali directory or zip archive into DEX (smali)
    #[command(name = "smali2dex")]
    SmaliToDex {
        /// Smali directory or zip archive
        source: PathBuf,

        /// Output DEX file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Translate a DEX or APK into a jar (dex2jar)
    #[command(name = "dex2jar")]
    DexToJar {
        /// DEX or APK file
        source: PathBuf,

        /// Output jar
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Translate a jar into DEX (dex2jar)
    #[command(name = "jar2dex")]
    JarToDex {
        /// Jar file
        jar: PathBuf,

        /// Output DEX file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Rewrite an APK as a plain zip archive (dex2jar)
    #[command(name = "apk2zip")]
    ApkToZip {
        /// Source APK
        apk: PathBuf,

        /// Output zip
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Sign an APK with jarsigner, writing <name>_signed.apk beside it
    Sign {
        /// APK to sign
        apk: PathBuf,

        /// TOML file with keystore_path, keystore_password, alias, alias_password
        #[arg(long, conflicts_with_all = ["keystore", "storepass", "alias", "keypass"])]
        keystore_config: Option<PathBuf>,

        /// Keystore file
        #[arg(long, requires_all = ["storepass", "alias", "keypass"])]
        keystore: Option<PathBuf>,

        /// Keystore password
        #[arg(long)]
        storepass: Option<String>,

        /// Key alias
        #[arg(long)]
        alias: Option<String>,

        /// Key password
        #[arg(long)]
        keypass: Option<String>,
    },

    /// Register a framework APK with apktool (apktool if)
    InstallFramework {
        /// Framework APK, e.g. framework-res.apk
        apk: PathBuf,
    },
}
