use apkforge::prelude::*;
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::{TempDir, tempdir};
use zip::write::SimpleFileOptions;

type Behavior = Box<dyn Fn(&ToolInvocation) -> io::Result<ToolOutput> + Send + Sync>;

/// Records every invocation and answers with `behavior` instead of
/// launching a process.
struct FakeRunner {
    calls: Mutex<Vec<ToolInvocation>>,
    behavior: Behavior,
}

impl FakeRunner {
    fn new(behavior: impl Fn(&ToolInvocation) -> io::Result<ToolOutput> + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            behavior: Box::new(behavior),
        }
    }

    /// Every tool succeeds and writes the output it was asked for.
    fn succeeding() -> Self {
        Self::new(simulate)
    }

    fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, invocation: &ToolInvocation) -> io::Result<ToolOutput> {
        self.calls.lock().unwrap().push(invocation.clone());
        (self.behavior)(invocation)
    }
}

fn path_value(invocation: &ToolInvocation, flag: &str) -> Option<PathBuf> {
    invocation.value_of(flag).map(PathBuf::from)
}

/// Subcommand of a `java -jar <jar> <sub> ...` invocation.
fn subcommand(invocation: &ToolInvocation) -> String {
    invocation.args[2].to_string_lossy().into_owned()
}

fn dx_output(invocation: &ToolInvocation) -> Option<PathBuf> {
    invocation
        .args
        .iter()
        .find_map(|a| a.to_str()?.strip_prefix("--output=").map(PathBuf::from))
}

fn write_output(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Produce what each real tool would produce.
fn simulate(invocation: &ToolInvocation) -> io::Result<ToolOutput> {
    match invocation.tool {
        Tool::Dx => write_output(&dx_output(invocation).unwrap(), b"dex\n035\0")?,
        Tool::Smali => write_output(&path_value(invocation, "-o").unwrap(), b"dex\n035\0")?,
        Tool::Baksmali => {
            let dir = path_value(invocation, "-o").unwrap();
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("Main.smali"), ".class public LMain;\n")?;
        }
        Tool::Apktool => match subcommand(invocation).as_str() {
            "d" => {
                let dir = path_value(invocation, "-o").unwrap();
                fs::create_dir_all(&dir)?;
                fs::write(dir.join("apktool.yml"), "apkFileName: app.apk\n")?;
            }
            "b" => {
                let folder = PathBuf::from(&invocation.args[3]);
                let out = path_value(invocation, "-o")
                    .unwrap_or_else(|| folder.join("dist").join("app.apk"));
                write_output(&out, b"PK")?;
            }
            _ => {}
        },
        Tool::Dex2jar => {
            let out = path_value(invocation, "--output")
                .or_else(|| path_value(invocation, "-o"))
                .unwrap();
            write_output(&out, b"PK")?;
        }
        Tool::Jarsigner => write_output(&path_value(invocation, "-signedjar").unwrap(), b"PK")?,
        Tool::Java => {}
    }
    Ok(ToolOutput::success())
}

struct Fixture {
    _dir: TempDir,
    work: PathBuf,
    toolchain: Toolchain,
}

fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let tools = dir.path().join("tools");
    fs::create_dir_all(tools.join("dex2jar").join("lib")).unwrap();
    for jar in ["apktool.jar", "dx.jar", "baksmali.jar", "smali.jar"] {
        fs::write(tools.join(jar), b"").unwrap();
    }
    let config = ToolchainConfig {
        tools_dir: tools.to_string_lossy().into_owned(),
        ..ToolchainConfig::default()
    };
    let toolchain = Toolchain::initialize(&config).unwrap();

    let work = dir.path().join("work");
    fs::create_dir_all(&work).unwrap();
    Fixture {
        _dir: dir,
        work,
        toolchain,
    }
}

fn class_dir(work: &Path) -> PathBuf {
    let classes = work.join("classes").join("com").join("example");
    fs::create_dir_all(&classes).unwrap();
    fs::write(classes.join("Main.class"), b"\xCA\xFE\xBA\xBE").unwrap();
    work.join("classes")
}

fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

fn zip_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    archive.file_names().map(str::to_string).collect()
}

/// Scratch files and directories left in `dir`.
fn leftovers(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".apkforge-") || name.starts_with("copy_"))
        .collect()
}

#[test]
fn test_missing_tool_artifact() {
    let fx = fixture();
    fs::remove_file(fx.toolchain.path(Tool::Smali)).unwrap();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);

    let smali = fx.work.join("smali");
    fs::create_dir_all(&smali).unwrap();
    let out = fx.work.join("classes.dex");
    fs::write(&out, b"old build").unwrap();

    let err = converter.smali_to_dex(&smali, &out).unwrap_err();
    assert!(matches!(err, Error::ToolMissing { tool: Tool::Smali, .. }));
    assert_eq!(err.kind(), ErrorKind::ToolInvocationFailed);
    assert!(!out.exists());
    assert!(runner.calls().is_empty());
}

#[test]
fn test_class_to_dex_missing_dx_removes_stale_output() {
    let fx = fixture();
    fs::remove_file(fx.toolchain.path(Tool::Dx)).unwrap();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let classes = class_dir(&fx.work);
    let out = fx.work.join("classes.dex");
    fs::write(&out, b"old build").unwrap();

    let err = converter.class_to_dex(&classes, &out).unwrap_err();
    assert!(matches!(err, Error::ToolMissing { tool: Tool::Dx, .. }));
    assert!(!out.exists());
}

#[test]
fn test_smali_to_dex_corrupt_archive_removes_stale_output() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let archive = fx.work.join("smali.zip");
    fs::write(&archive, b"not a zip").unwrap();
    let out = fx.work.join("classes.dex");
    fs::write(&out, b"old build").unwrap();

    let err = converter.smali_to_dex(&archive, &out).unwrap_err();
    assert!(matches!(err, Error::NotADirectory { .. }));
    assert!(!out.exists());
    assert!(runner.calls().is_empty());
    assert!(leftovers(&fx.work).is_empty());
}

#[test]
fn test_every_operation_rejects_missing_input() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let missing = fx.work.join("missing");
    let out = fx.work.join("out");
    let keystore_path = fx.work.join("release.jks");
    fs::write(&keystore_path, b"jks").unwrap();
    let keystore = KeystoreConfig::new(&keystore_path, "a", "release", "b");

    let check = |name: &str, result: apkforge::Result<()>| {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputMissing, "{name}: {err}");
        assert!(!out.exists(), "{name} created {}", out.display());
    };

    check("decompile", converter.decompile(&missing, &out));
    check("recompile", converter.recompile(&missing, Some(&out)).map(|_| ()));
    check("class_to_dex", converter.class_to_dex(&missing, &out));
    check("dex_to_smali", converter.dex_to_smali(&missing, &out));
    check("class_to_smali", converter.class_to_smali(&missing, &out));
    check("jar_to_smali", converter.jar_to_smali(&missing, &out));
    check("smali_to_dex", converter.smali_to_dex(&missing, &out));
    check("dex_to_jar", converter.dex_to_jar(&missing, &out));
    check("jar_to_dex", converter.jar_to_dex(&missing, &out));
    check("apk_to_zip", converter.apk_to_zip(&missing, &out));
    check("sign_apk", converter.sign_apk(&missing, &keystore).map(|_| ()));
    check("install_framework", converter.install_framework(&missing));

    assert!(runner.calls().is_empty());
    assert!(!fx.work.join("missing_signed.apk").exists());
    assert!(leftovers(&fx.work).is_empty());
}

#[test]
fn test_class_to_dex_argument_vector() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let classes = class_dir(&fx.work);
    let out = fx.work.join("build").join("nested").join("classes.dex");

    converter.class_to_dex(&classes, &out).unwrap();

    assert!(out.is_file());
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    let args: Vec<String> = calls[0].args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(args[0], "-cp");
    assert_eq!(args[2], "com.android.dx.command.Main");
    assert_eq!(&args[3..5], ["--dex", "--no-strict"]);
    assert_eq!(args[5], format!("--output={}", out.display()));
    assert_eq!(args[6], classes.to_string_lossy());
}

#[test]
fn test_class_to_smali_cleans_scratch_on_success() {
    let fx = fixture();
    let runner = FakeRunner::new(|inv| {
        if inv.tool == Tool::Baksmali {
            let dex = PathBuf::from(inv.args.last().unwrap());
            assert!(dex.is_file(), "scratch DEX must exist while baksmali runs");
        }
        simulate(inv)
    });
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let classes = class_dir(&fx.work);
    let out = fx.work.join("smali");

    converter.class_to_smali(&classes, &out).unwrap();

    assert!(out.join("Main.smali").is_file());
    let calls = runner.calls();
    assert_eq!(calls.iter().map(|c| c.tool).collect::<Vec<_>>(), [Tool::Dx, Tool::Baksmali]);
    assert_eq!(dx_output(&calls[0]).unwrap(), PathBuf::from(calls[1].args.last().unwrap()));
    assert!(leftovers(&fx.work).is_empty());
}

#[test]
fn test_class_to_smali_cleans_scratch_on_failure() {
    let fx = fixture();
    let runner = FakeRunner::new(|inv| {
        if inv.tool == Tool::Baksmali {
            return Ok(ToolOutput::failure(1, "UNEXPECTED TOP-LEVEL EXCEPTION"));
        }
        simulate(inv)
    });
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let classes = class_dir(&fx.work);

    let err = converter.class_to_smali(&classes, &fx.work.join("smali")).unwrap_err();

    assert!(matches!(err, Error::ToolFailed { tool: Tool::Baksmali, .. }));
    assert!(leftovers(&fx.work).is_empty());
}

#[test]
fn test_failure_callback_fires_once() {
    let fx = fixture();
    let runner = FakeRunner::new(|inv| {
        if inv.tool == Tool::Dx {
            return Ok(ToolOutput::failure(2, "bad class file magic"));
        }
        simulate(inv)
    });
    let fired = Cell::new(0);
    let on_failure = |e: &Error| {
        assert_eq!(e.kind(), ErrorKind::ToolInvocationFailed);
        fired.set(fired.get() + 1);
    };
    let converter = Converter::with_runner(&fx.toolchain, &runner).on_failure(&on_failure);
    let classes = class_dir(&fx.work);

    assert!(converter.class_to_smali(&classes, &fx.work.join("smali")).is_err());
    assert_eq!(fired.get(), 1);

    converter.dex_to_jar(&fx.work.join("missing.dex"), &fx.work.join("a.jar")).unwrap_err();
    assert_eq!(fired.get(), 2);
}

#[test]
fn test_callback_silent_on_success() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let fired = Cell::new(false);
    let on_failure = |_: &Error| fired.set(true);
    let converter = Converter::with_runner(&fx.toolchain, &runner).on_failure(&on_failure);

    let dex = fx.work.join("classes.dex");
    fs::write(&dex, b"dex\n035\0").unwrap();
    converter.dex_to_smali(&dex, &fx.work.join("smali")).unwrap();
    assert!(!fired.get());
}

#[test]
fn test_jar_to_smali_rejects_directory() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let classes = class_dir(&fx.work);

    let err = converter.jar_to_smali(&classes, &fx.work.join("smali")).unwrap_err();
    assert!(matches!(err, Error::NotAFile { .. }));
    assert!(runner.calls().is_empty());
}

#[test]
fn test_jar_to_smali_accepts_jar() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let jar = fx.work.join("lib.jar");
    write_zip(&jar, &[("com/example/Main.class", b"\xCA\xFE\xBA\xBE")]);

    converter.jar_to_smali(&jar, &fx.work.join("smali")).unwrap();
    assert_eq!(runner.calls().len(), 2);
    assert!(leftovers(&fx.work).is_empty());
}

#[test]
fn test_dex_to_smali_caps_jobs() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let dex = fx.work.join("classes.dex");
    fs::write(&dex, b"dex\n035\0").unwrap();

    converter.dex_to_smali(&dex, &fx.work.join("smali")).unwrap();

    let call = &runner.calls()[0];
    assert_eq!(subcommand(call), "d");
    assert_eq!(call.value_of("-a").unwrap(), "15");
    let jobs: usize = call.value_of("-j").unwrap().to_str().unwrap().parse().unwrap();
    assert!((1..=6).contains(&jobs));
}

#[test]
fn test_smali_to_dex_failure_leaves_no_stale_output() {
    let fx = fixture();
    let runner = FakeRunner::new(|_| Ok(ToolOutput::failure(1, "smali: syntax error")));
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let smali = fx.work.join("smali");
    fs::create_dir_all(&smali).unwrap();
    let out = fx.work.join("classes.dex");
    fs::write(&out, b"old build").unwrap();

    let err = converter.smali_to_dex(&smali, &out).unwrap_err();
    assert!(matches!(err, Error::ToolFailed { tool: Tool::Smali, .. }));
    assert!(!out.exists());
}

#[test]
fn test_nonzero_exit_with_output_is_failure() {
    let fx = fixture();
    let runner = FakeRunner::new(|inv| {
        simulate(inv)?;
        Ok(ToolOutput::failure(3, "partial write"))
    });
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let classes = class_dir(&fx.work);
    let out = fx.work.join("classes.dex");

    let err = converter.class_to_dex(&classes, &out).unwrap_err();
    assert_eq!(err.to_string(), "dx exited with status 3: partial write");
    assert!(!out.exists());
}

#[test]
fn test_success_without_output_is_postcondition_failure() {
    let fx = fixture();
    let runner = FakeRunner::new(|_| Ok(ToolOutput::success()));
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let jar = fx.work.join("app.jar");
    write_zip(&jar, &[("Main.class", b"\xCA\xFE\xBA\xBE")]);

    let err = converter.jar_to_dex(&jar, &fx.work.join("classes.dex")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PostconditionUnmet);
}

#[test]
fn test_smali_to_dex_from_archive() {
    let fx = fixture();
    let runner = FakeRunner::new(|inv| {
        let dir = PathBuf::from(inv.args.last().unwrap());
        assert!(dir.join("com/example/Main.smali").is_file());
        simulate(inv)
    });
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let archive = fx.work.join("smali.zip");
    write_zip(&archive, &[("com/example/Main.smali", b".class public Lcom/example/Main;\n")]);
    let out = fx.work.join("classes.dex");

    converter.smali_to_dex(&archive, &out).unwrap();

    assert!(out.is_file());
    assert!(leftovers(&fx.work).is_empty());
}

#[test]
fn test_dex2jar_family_arguments() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let apk = fx.work.join("app.apk");
    write_zip(&apk, &[("classes.dex", b"dex\n035\0")]);
    let jar = fx.work.join("app.jar");
    let dex = fx.work.join("out.dex");
    fs::write(&dex, b"stale").unwrap();

    converter.dex_to_jar(&apk, &jar).unwrap();
    converter.jar_to_dex(&jar, &dex).unwrap();
    converter.apk_to_zip(&apk, &fx.work.join("app.zip")).unwrap();

    let calls = runner.calls();
    let classpath = fx.toolchain.path(Tool::Dex2jar).join("*");
    for call in &calls {
        assert_eq!(call.value_of("-cp").unwrap(), classpath.as_os_str());
    }
    assert_eq!(calls[0].args[2], "com.googlecode.dex2jar.tools.Dex2jarCmd");
    assert_eq!(calls[1].args[2], "com.googlecode.dex2jar.tools.Jar2Dex");
    assert!(calls[1].position_of("--force").is_some());
    assert_eq!(calls[2].args[2], "com.googlecode.dex2jar.tools.StdApkCmd");
    assert_eq!(fs::read(&dex).unwrap(), b"PK");
}

#[test]
fn test_sign_apk_strips_signature_and_cleans_copy() {
    let fx = fixture();
    let runner = FakeRunner::new(|inv| {
        if inv.tool == Tool::Jarsigner {
            let alias_index = inv.args.len() - 1;
            let copy = PathBuf::from(&inv.args[alias_index - 1]);
            let names = zip_names(&copy);
            assert!(names.iter().all(|n| !n.starts_with("META-INF/")));
            assert!(names.contains(&"classes.dex".to_string()));
        }
        simulate(inv)
    });
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let apk = fx.work.join("app.apk");
    write_zip(
        &apk,
        &[
            ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n"),
            ("META-INF/CERT.RSA", b"sig"),
            ("classes.dex", b"dex\n035\0"),
        ],
    );
    let keystore_path = fx.work.join("release.jks");
    fs::write(&keystore_path, b"jks").unwrap();
    let keystore = KeystoreConfig::new(&keystore_path, "store pass; rm -rf", "release", "key'pass");

    let signed = converter.sign_apk(&apk, &keystore).unwrap();

    assert_eq!(signed, fx.work.join("app_signed.apk"));
    assert!(signed.is_file());
    assert!(leftovers(&fx.work).is_empty());
    assert_eq!(zip_names(&apk).len(), 3);

    let call = &runner.calls()[0];
    assert_eq!(call.value_of("-storepass").unwrap(), "store pass; rm -rf");
    assert_eq!(call.value_of("-keypass").unwrap(), "key'pass");
    assert_eq!(call.value_of("-digestalg").unwrap(), "SHA-256");
    assert_eq!(call.value_of("-sigalg").unwrap(), "SHA256withRSA");
    assert_eq!(call.args.last().unwrap(), "release");
    assert!(!call.to_string().contains("store pass"));
}

#[test]
fn test_sign_apk_failure_cleans_copy() {
    let fx = fixture();
    let runner = FakeRunner::new(|_| Ok(ToolOutput::failure(1, "jarsigner error: keystore was tampered with")));
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let apk = fx.work.join("app.apk");
    write_zip(&apk, &[("classes.dex", b"dex\n035\0")]);
    let keystore_path = fx.work.join("release.jks");
    fs::write(&keystore_path, b"jks").unwrap();
    let keystore = KeystoreConfig::new(&keystore_path, "a", "release", "b");

    converter.sign_apk(&apk, &keystore).unwrap_err();

    assert!(leftovers(&fx.work).is_empty());
    assert!(!fx.work.join("app_signed.apk").exists());
}

#[test]
fn test_sign_apk_missing_keystore() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let apk = fx.work.join("app.apk");
    write_zip(&apk, &[("classes.dex", b"dex\n035\0")]);
    let keystore = KeystoreConfig::new(fx.work.join("missing.jks"), "a", "release", "b");

    let err = converter.sign_apk(&apk, &keystore).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputMissing);
    assert!(runner.calls().is_empty());
}

#[test]
fn test_decompile_then_recompile_default_output() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let apk = fx.work.join("app.apk");
    write_zip(&apk, &[("AndroidManifest.xml", b"\x03\x00")]);
    let project = fx.work.join("app_src");

    converter.decompile(&apk, &project).unwrap();
    let rebuilt = converter.recompile(&project, None).unwrap();

    assert_eq!(rebuilt, project.join("dist").join("app.apk"));
    assert!(rebuilt.is_file());

    let calls = runner.calls();
    assert_eq!(subcommand(&calls[0]), "d");
    assert!(calls[0].position_of("-f").is_some());
    assert_eq!(subcommand(&calls[1]), "b");
    assert!(calls[1].position_of("-o").is_none());
}

#[test]
fn test_recompile_explicit_output() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let project = fx.work.join("app_src");
    fs::create_dir_all(&project).unwrap();
    let out = fx.work.join("out").join("rebuilt.apk");

    let rebuilt = converter.recompile(&project, Some(&out)).unwrap();
    assert_eq!(rebuilt, out);

    let mut content = Vec::new();
    fs::File::open(&out).unwrap().read_to_end(&mut content).unwrap();
    assert_eq!(content, b"PK");
}

#[test]
fn test_decompile_without_marker_fails() {
    let fx = fixture();
    let runner = FakeRunner::new(|_| Ok(ToolOutput::success()));
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let apk = fx.work.join("app.apk");
    write_zip(&apk, &[("AndroidManifest.xml", b"\x03\x00")]);

    let err = converter.decompile(&apk, &fx.work.join("app_src")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PostconditionUnmet);
}

#[test]
fn test_install_framework() {
    let fx = fixture();
    let runner = FakeRunner::succeeding();
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let framework = fx.work.join("framework-res.apk");
    write_zip(&framework, &[("resources.arsc", b"\x02\x00")]);

    converter.install_framework(&framework).unwrap();

    let call = &runner.calls()[0];
    assert_eq!(subcommand(call), "if");
    assert_eq!(call.args[3], framework.as_os_str());
}

#[test]
fn test_launch_error_is_tool_failure() {
    let fx = fixture();
    let runner = FakeRunner::new(|_| Err(io::Error::new(io::ErrorKind::NotFound, "java not found")));
    let converter = Converter::with_runner(&fx.toolchain, &runner);
    let dex = fx.work.join("classes.dex");
    fs::write(&dex, b"dex\n035\0").unwrap();

    let err = converter.dex_to_smali(&dex, &fx.work.join("smali")).unwrap_err();
    assert!(matches!(err, Error::ToolLaunch { tool: Tool::Baksmali, .. }));
    assert_eq!(err.kind(), ErrorKind::ToolInvocationFailed);
}
