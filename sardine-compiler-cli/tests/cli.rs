use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const USERS: &str = r#"import { Db } from '../db'

export interface User { id: string }

export const getUser = async (db: Db, id: string): Promise<User> => {
  return db.find(id)
}
"#;

const INDEX: &str = "export function version(): string { return '1.0.0' }\n";

fn project(files: &[(&str, &str)]) -> TempDir {
  let dir = tempfile::tempdir().expect("create temp dir");
  for (path, content) in files {
    let path = dir.path().join(path);
    fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
    fs::write(path, content).expect("write source");
  }
  dir
}

fn sardine(dir: &TempDir) -> Command {
  let mut cmd = Command::cargo_bin("sardine-compiler").unwrap();
  cmd.current_dir(dir.path()).env_remove("RUST_LOG");
  cmd
}

fn read(dir: &TempDir, path: &str) -> String {
  fs::read_to_string(dir.path().join(path)).unwrap_or_else(|e| panic!("read {path}: {e}"))
}

fn exists(dir: &TempDir, path: &str) -> bool {
  dir.path().join(path).exists()
}

fn no_intermediate_files(dir: &Path) -> bool {
  walkdir_like(dir).iter().all(|p| !p.ends_with(".tmp"))
}

fn walkdir_like(dir: &Path) -> Vec<String> {
  let mut out = Vec::new();
  for entry in fs::read_dir(dir).unwrap() {
    let path = entry.unwrap().path();
    if path.is_dir() {
      out.extend(walkdir_like(&path));
    } else {
      out.push(path.display().to_string());
    }
  }
  out
}

#[test]
fn compiles_directory_and_writes_descriptor() {
  let dir = project(&[("src/api/users.ts", USERS), ("src/index.ts", INDEX)]);
  sardine(&dir)
    .args(["--application", "demo", "--gen-services=services.json", "src"])
    .assert()
    .success();

  assert_eq!(read(&dir, "src/api/users.sardine.ts"), USERS);
  assert_eq!(read(&dir, "src/index.sardine.ts"), INDEX);
  let users = read(&dir, "src/api/users.ts");
  assert!(users.starts_with("import * as origin from './users.sardine'\n"), "{users}");
  assert!(users.contains("import { Db } from '../db'\n"));
  assert!(users.contains("export { User } from './users.sardine'\n"));
  assert!(users.contains("Core.isRemote('demo', '/api/users', 'getUser', '*')"));
  assert!(read(&dir, "src/index.ts").contains("return origin.version()"));
  assert!(no_intermediate_files(dir.path()));

  let descriptor: Value = serde_json::from_str(&read(&dir, "services.json")).unwrap();
  assert_eq!(descriptor["application"], "demo");
  let services = descriptor["services"].as_array().unwrap();
  let identities: Vec<String> = services
    .iter()
    .map(|s| format!("{}:{}", s["module"].as_str().unwrap(), s["name"].as_str().unwrap()))
    .collect();
  assert_eq!(identities, vec!["/api/users:getUser", "/:version"]);
  assert_eq!(services[0]["returnType"], "User");
  assert_eq!(services[0]["isAsync"], true);
  assert_eq!(services[0]["filepath"], "/api/users.ts");
}

#[test]
fn compiled_files_are_skipped_and_reversible() {
  let dir = project(&[("src/api/users.ts", USERS)]);
  sardine(&dir)
    .args(["--application", "demo", "src"])
    .assert()
    .success();
  let proxy = read(&dir, "src/api/users.ts");

  // A second run leaves the compiled module alone.
  sardine(&dir)
    .args(["--application", "demo", "src/api/users.ts"])
    .assert()
    .success();
  assert_eq!(read(&dir, "src/api/users.ts"), proxy);

  sardine(&dir)
    .args(["--recompile", "--application", "other", "src"])
    .assert()
    .success();
  assert!(read(&dir, "src/api/users.ts").contains("Core.isRemote('other'"));
  assert_eq!(read(&dir, "src/api/users.sardine.ts"), USERS);

  sardine(&dir).args(["--undo", "src"]).assert().success();
  assert_eq!(read(&dir, "src/api/users.ts"), USERS);
  assert!(!exists(&dir, "src/api/users.sardine.ts"));
}

#[test]
fn validate_halts_on_first_error() {
  let dir = project(&[
    ("src/a.ts", "export class Broken {}\n"),
    ("src/b.ts", INDEX),
  ]);
  sardine(&dir)
    .args(["--validate", "--application", "demo", "src"])
    .assert()
    .failure()
    .stderr(contains("illegal export type ClassDeclaration"));
  assert_eq!(read(&dir, "src/a.ts"), "export class Broken {}\n");
  assert!(!exists(&dir, "src/a.sardine.ts"));
  assert!(!exists(&dir, "src/b.sardine.ts"));
  assert!(no_intermediate_files(dir.path()));
}

#[test]
fn best_effort_continues_but_skips_descriptor() {
  let dir = project(&[
    ("src/a.ts", "export default function () {}\n"),
    ("src/b.ts", INDEX),
  ]);
  sardine(&dir)
    .args(["--application", "demo", "--gen-services=services.json", "src"])
    .assert()
    .failure()
    .stderr(contains("default exports are not supported"));
  assert!(exists(&dir, "src/b.sardine.ts"));
  assert!(!exists(&dir, "services.json"));
}

#[test]
fn unsupported_file_types_fail() {
  let dir = project(&[("src/notes.md", "# notes\n")]);
  sardine(&dir)
    .args(["--application", "demo", "src"])
    .assert()
    .failure()
    .stderr(contains("unsupported file type `md`"));
}

#[test]
fn only_validate_writes_nothing() {
  let dir = project(&[("src/index.ts", INDEX)]);
  sardine(&dir)
    .args(["--only-validate", "--print", "--application", "demo", "src"])
    .assert()
    .success()
    .stdout(contains("export const version = () => {"));
  assert_eq!(read(&dir, "src/index.ts"), INDEX);
  assert!(!exists(&dir, "src/index.sardine.ts"));
}

#[test]
fn unresolved_types_leave_source_untouched() {
  let source = "export const h = (p: Bar) => p\n";
  let dir = project(&[("src/h.ts", source)]);
  sardine(&dir)
    .args(["--application", "demo", "src/h.ts"])
    .assert()
    .failure()
    .stderr(contains("type reference `Bar` needs to be exported"));
  assert_eq!(read(&dir, "src/h.ts"), source);
  assert!(no_intermediate_files(dir.path()));
}

#[test]
fn config_file_supplies_defaults() {
  let dir = project(&[
    ("src/index.ts", "export const now = (at: Date) => at\n"),
    (
      "sardines-config.json",
      r#"{
        "application": "from-config",
        "repositoryEntries": [],
        "ambientTypes": ["Date"],
        "runtimeModule": "@acme/core",
        "genServices": true
      }"#,
    ),
  ]);
  sardine(&dir)
    .args(["--config", "sardines-config.json"])
    .assert()
    .success();
  let proxy = read(&dir, "src/index.ts");
  assert!(proxy.contains("import { Core } from '@acme/core'\n"), "{proxy}");
  assert!(proxy.contains("Core.isRemote('from-config', '/', 'now', '*')"));
  let descriptor: Value =
    serde_json::from_str(&read(&dir, "sardines-local-services.json")).unwrap();
  assert_eq!(descriptor["application"], "from-config");
  assert_eq!(descriptor["services"][0]["name"], "now");
}

#[test]
fn broken_config_is_reported() {
  let dir = project(&[("sardines-config.json", "{}")]);
  sardine(&dir)
    .args(["--config", "sardines-config.json"])
    .assert()
    .failure()
    .stderr(contains("is empty"));
}
