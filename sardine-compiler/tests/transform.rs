use sardine_compiler::err::CompileError;
use sardine_compiler::gather_exports;
use sardine_compiler::service::Argument;
use sardine_compiler::transform;
use sardine_compiler::GatherOptions;
use sardine_compiler::ModuleContext;
use sardine_compiler::ModuleText;
use sardine_compiler::ServiceRecord;
use sardine_compiler::TransformOptions;
use similar::ChangeTag;
use similar::TextDiff;
use std::io;

const CTX: ModuleContext<'static> = ModuleContext {
  application: "demo",
  file_base_name: "users",
  archived_module: "users.sardine",
  source_file_path: "src/api/users.ts",
};

fn compile_with(
  source: &str,
  options: &TransformOptions,
) -> Result<(String, Vec<ServiceRecord>), CompileError> {
  let gathered = gather_exports(source, CTX.source_file_path, &GatherOptions::default())?;
  let mut text = ModuleText::new();
  let services = transform(&CTX, &gathered, options, &mut text)?;
  Ok((text.to_string(), services))
}

fn compile(source: &str) -> (String, Vec<ServiceRecord>) {
  compile_with(source, &TransformOptions::default()).expect("source should compile")
}

fn assert_text_eq(expected: &str, actual: &str) {
  if expected == actual {
    return;
  }
  let mut msg = "generated module differs:\n".to_string();
  let diff = TextDiff::from_lines(expected, actual);
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(change.as_str().unwrap_or_default());
  }
  panic!("{}", msg);
}

#[test]
fn generates_proxy_module() {
  let (text, services) = compile(
    r#"
import { Bar } from './bar'
import * as ns from './ns'
export { helper } from './helper'

export interface Options { retries: number }

export const fetch = async (id: string, bar: Bar, opts: Options = defaults): Promise<string> => {
  return id
}

export function count(q: ns.Query, ...rest: number[]) {
  return rest.length
}
"#,
  );
  assert_text_eq(
    r#"import * as origin from './users.sardine'
import { Core } from 'sardines-core'
import { Bar } from './bar'
import { Options } from './users.sardine'
import * as ns from './ns'
export { helper } from './helper'
export { Options } from './users.sardine'

export const fetch = async (id: string, bar: Bar, opts: Options = defaults) => {
  if (Core.isRemote('demo', '/api/users', 'fetch', '*')) {
    return await Core.invoke({
      application: 'demo',
      module: '/api/users',
      name: 'fetch',
      version: '*'
    }, id, bar, opts)
  } else {
    return await origin.fetch(id, bar, opts)
  }
}

export const count = (q: ns.Query, ...rest: number[]) => {
  if (Core.isRemote('demo', '/api/users', 'count', '*')) {
    return new Promise((resolve, reject) => {
      Core.invoke({
        application: 'demo',
        module: '/api/users',
        name: 'count',
        version: '*'
      }, q, ...rest).then(res => resolve(res)).catch(e => reject(e))
    })
  } else {
    return origin.count(q, ...rest)
  }
}
"#,
    &text,
  );

  assert_eq!(services.len(), 2);
  let fetch = &services[0];
  assert_eq!(fetch.identity(), "/api/users:fetch");
  assert!(fetch.is_async);
  assert_eq!(fetch.return_type, "string");
  assert_eq!(fetch.filepath.as_deref(), Some("/api/users.ts"));
  assert_eq!(fetch.arguments[2], Argument {
    name: "opts".to_string(),
    r#type: Some("Options".to_string()),
    default: Some("defaults".to_string()),
  });
  let count = &services[1];
  assert!(!count.is_async);
  assert_eq!(count.arguments[1].name, "...rest");
}

#[test]
fn interfaces_are_reexported_without_proxy() {
  let (text, services) = compile("export interface Foo { a: string }");
  assert_eq!(text, "export { Foo } from './users.sardine'\n");
  assert!(services.is_empty());
}

#[test]
fn type_aliases_are_reexported_without_proxy() {
  let (text, services) = compile("export type Id = string | number");
  assert_eq!(text, "export { Id } from './users.sardine'\n");
  assert!(services.is_empty());
}

#[test]
fn sync_proxy_does_not_await() {
  let (text, _) = compile("export const g = (a: number) => a * 2");
  assert!(text.contains("export const g = (a: number) => {\n"));
  assert!(text.contains("    return new Promise((resolve, reject) => {\n"));
  assert!(text.contains("    return origin.g(a)\n"));
  assert!(!text.contains("await"));
}

#[test]
fn destructured_parameters_with_defaults_forward_valid_expressions() {
  let (text, services) = compile(
    r#"
    export interface O { a?: number; n?: { b?: string } }
    export const f = ({ a = 1, n: { b = 'x' } = {} }: O, [first, , third = 3]: number[]) => a
    "#,
  );
  assert!(text.contains(
    "export const f = ({ a = 1, n: { b = 'x' } = {} }: O, [first, , third = 3]: number[]) => {\n"
  ));
  assert!(text.contains("      }, { a, n: { b } }, [first, , third]).then(res => resolve(res))"));
  assert!(text.contains("    return origin.f({ a, n: { b } }, [first, , third])\n"));
  assert!(!text.contains("origin.f({ a = 1"));
  assert_eq!(services[0].arguments.len(), 2);
}

#[test]
fn aliased_local_export_gets_its_own_proxy() {
  let (text, services) = compile(
    r#"
    const a = async (x: number) => x
    export { a as b }
    "#,
  );
  assert!(text.contains("export const b = async (x: number) => {\n"));
  assert!(text.contains("    return await origin.b(x)\n"));
  assert!(!text.contains("origin.a"));
  assert_eq!(services[0].name, "b");
}

#[test]
fn type_parameters_are_redeclared() {
  let (text, _) = compile(
    r#"
    import { Entity } from './entity'
    export const save = async <T extends Entity>(item: T): Promise<T> => item
    "#,
  );
  assert!(text.contains("import { Entity } from './entity'\n"));
  assert!(text.contains("export const save = async <T extends Entity>(item: T) => {\n"));
}

#[test]
fn unresolved_type_reference_emits_nothing() {
  let gathered = gather_exports(
    "export const h = (p: Bar) => p",
    CTX.source_file_path,
    &GatherOptions::default(),
  )
  .expect("source should gather");
  let mut emitted = Vec::new();
  let mut sink = |line: &str, index: usize| -> io::Result<()> {
    emitted.push((index, line.to_string()));
    Ok(())
  };
  let err = transform(&CTX, &gathered, &TransformOptions::default(), &mut sink)
    .expect_err("Bar is neither declared nor imported");
  assert!(
    matches!(&err, CompileError::UnresolvedTypeReference { name, file } if name == "Bar" && file == "src/api/users.ts"),
    "{err}"
  );
  assert!(emitted.is_empty());
}

#[test]
fn line_indices_start_at_zero_and_increase() {
  let gathered = gather_exports(
    "export enum Color { Red }\nexport const f = () => 1",
    CTX.source_file_path,
    &GatherOptions::default(),
  )
  .expect("source should gather");
  let mut indices = Vec::new();
  let mut sink = |_: &str, index: usize| -> io::Result<()> {
    indices.push(index);
    Ok(())
  };
  transform(&CTX, &gathered, &TransformOptions::default(), &mut sink)
    .expect("module should transform");
  assert_eq!(indices, (0..indices.len()).collect::<Vec<_>>());
}

#[test]
fn rerunning_into_the_same_sink_is_idempotent() {
  let gathered = gather_exports(
    "export async function f(a: string) { return a }",
    CTX.source_file_path,
    &GatherOptions::default(),
  )
  .expect("source should gather");
  let mut text = ModuleText::new();
  transform(&CTX, &gathered, &TransformOptions::default(), &mut text)
    .expect("module should transform");
  let first = text.to_string();
  transform(&CTX, &gathered, &TransformOptions::default(), &mut text)
    .expect("module should transform");
  assert_eq!(first, text.to_string());
}

#[test]
fn runtime_module_is_configurable() {
  let options = TransformOptions {
    runtime_module: "@acme/rpc".to_string(),
  };
  let (text, _) = compile_with("export function f() {}", &options).expect("source should compile");
  assert!(text.contains("import { Core } from '@acme/rpc'\n"));
}

#[test]
fn sink_failures_are_reported() {
  let gathered = gather_exports(
    "export function f() {}",
    CTX.source_file_path,
    &GatherOptions::default(),
  )
  .expect("source should gather");
  let mut sink = |_: &str, index: usize| -> io::Result<()> {
    if index == 1 {
      return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
    }
    Ok(())
  };
  let err = transform(&CTX, &gathered, &TransformOptions::default(), &mut sink)
    .expect_err("sink fails on the second line");
  assert!(matches!(err, CompileError::Emit { .. }), "{err}");
}

mod arity {
  use super::*;
  use proptest::prelude::*;

  fn arb_param() -> impl Strategy<Value = (&'static str, Option<&'static str>)> {
    (
      prop_oneof![Just("number"), Just("string"), Just("boolean[]"), Just("Map<string, any>")],
      prop_oneof![Just(None), Just(Some("undefined")), Just(Some("0"))],
    )
  }

  proptest! {
    #[test]
    fn proxy_keeps_parameters(params in prop::collection::vec(arb_param(), 0..8), is_async in any::<bool>()) {
      let declared: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(i, (typ, default))| match default {
          Some(d) => format!("p{i}: {typ} = {d}"),
          None => format!("p{i}: {typ}"),
        })
        .collect();
      let names: Vec<String> = (0..params.len()).map(|i| format!("p{i}")).collect();
      let async_ = if is_async { "async " } else { "" };
      let source = format!("export const f = {async_}({}) => null", declared.join(", "));
      let (text, services) = compile(&source);

      let header = format!("export const f = {async_}({}) => {{\n", declared.join(", "));
      prop_assert!(text.contains(&header), "{}", text);
      let local = format!("origin.f({})\n", names.join(", "));
      prop_assert!(text.contains(&local), "{}", text);
      let arg_names: Vec<&str> = services[0].arguments.iter().map(|a| a.name.as_str()).collect();
      prop_assert_eq!(arg_names, names.iter().map(|n| n.as_str()).collect::<Vec<_>>());
    }
  }
}
