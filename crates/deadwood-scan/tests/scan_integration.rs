//! End-to-end scans over in-memory and on-disk trees.

use deadwood_core::{
    CharCount, Error, ErrorSeverity, Finding, FindingKind, KnownUsedSet, ScanOptions,
};
use deadwood_fs::{MemoryFileSystem, NativeFileSystem};
use deadwood_scan::{scan, Scanner};
use std::fs;
use std::io;
use tempfile::TempDir;

fn no_allowlist() -> ScanOptions {
    ScanOptions {
        known_used: KnownUsedSet::new(Vec::<String>::new()),
        ..Default::default()
    }
}

fn suspicious(findings: &[Finding]) -> Vec<(&str, usize)> {
    findings
        .iter()
        .filter_map(|f| match f {
            Finding::SuspiciousDirectory { path, file_count } => Some((path.as_str(), *file_count)),
            _ => None,
        })
        .collect()
}

#[test]
fn four_empty_files_make_a_suspicious_directory() {
    let fs = MemoryFileSystem::new("/project")
        .with_file("src/legacy/a.ts", "")
        .with_file("src/legacy/b.tsx", "  ")
        .with_file("src/legacy/c.js", "\n")
        .with_file("src/legacy/d.css", "");

    let report = scan(&fs, &no_allowlist()).unwrap();

    assert_eq!(suspicious(&report.findings), vec![("src/legacy", 4)]);
    assert_eq!(report.statistics.empty_files, 4);
    assert_eq!(report.statistics.suspicious_directories, 1);
}

#[test]
fn one_real_file_clears_the_directory() {
    let body = "export function useThing() {\n  return computeSomethingUseful(42);\n}\n";
    let fs = MemoryFileSystem::new("/project")
        .with_file("src/legacy/a.ts", "")
        .with_file("src/legacy/b.ts", "")
        .with_file("src/legacy/c.ts", "")
        .with_file("src/legacy/d.ts", "")
        .with_file("src/legacy/e.ts", body);

    let report = scan(&fs, &no_allowlist()).unwrap();

    assert!(suspicious(&report.findings).is_empty());
    assert_eq!(report.findings_of(FindingKind::Empty).count(), 4);
}

#[test]
fn three_empty_files_are_not_enough() {
    let fs = MemoryFileSystem::new("/project")
        .with_file("src/stubs/a.ts", "")
        .with_file("src/stubs/b.ts", "")
        .with_file("src/stubs/c.ts", "");

    let report = scan(&fs, &no_allowlist()).unwrap();
    assert!(suspicious(&report.findings).is_empty());
}

#[test]
fn missing_allowlisted_file_is_reported_once() {
    let fs = MemoryFileSystem::new("/project").with_file("src/main.tsx", "render(<App />)");
    let options = ScanOptions {
        known_used: KnownUsedSet::new(["src/lib/supabase.ts"]),
        ..Default::default()
    };

    let report = scan(&fs, &options).unwrap();
    let known: Vec<_> = report.findings_of(FindingKind::KnownPaths).collect();

    assert_eq!(
        known,
        vec![&Finding::KnownPathMissing {
            path: "src/lib/supabase.ts".to_string()
        }]
    );
}

#[test]
fn allowlisted_directories_count_as_present() {
    let fs = MemoryFileSystem::new("/project")
        .with_file("src/components/atoms/Button/Button.tsx", "export const Button = () => null;");
    let options = ScanOptions {
        known_used: KnownUsedSet::new(["src/components/atoms/Button"]),
        ..Default::default()
    };

    let report = scan(&fs, &options).unwrap();
    assert!(report.findings.contains(&Finding::KnownPathPresent {
        path: "src/components/atoms/Button".to_string()
    }));
}

#[test]
fn unreadable_code_file_is_not_empty() {
    let fs = MemoryFileSystem::new("/project")
        .with_file("src/binary.js", vec![0xc3, 0x28, 0xa0, 0xa1])
        .with_broken_file("src/locked.ts", io::ErrorKind::PermissionDenied)
        .with_file("src/ok.ts", "");

    let report = scan(&fs, &no_allowlist()).unwrap();

    let empty: Vec<&str> = report
        .findings_of(FindingKind::Empty)
        .filter_map(|f| match f {
            Finding::EmptyFile { file } => Some(file.path.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(empty, vec!["src/ok.ts"]);
    assert_eq!(report.statistics.unreadable_files, 2);
    assert_eq!(report.statistics.total_files, 3);
    assert!(report.errors.iter().any(|e| e.path == "src/binary.js"));
    assert!(report.errors.iter().any(|e| e.path == "src/locked.ts"));
}

#[test]
fn ignored_directories_contribute_nothing() {
    let fs = MemoryFileSystem::new("/project")
        .with_file("node_modules/react/index.js", "")
        .with_file("dist/a.js", "")
        .with_file("src/app/.next/cache.js", "")
        .with_file("src/index.ts", "import 'react';");

    let report = scan(&fs, &no_allowlist()).unwrap();

    assert_eq!(report.statistics.total_files, 1);
    assert!(report
        .directories
        .iter()
        .all(|d| d.path == "src"));
}

#[test]
fn import_and_require_resolve_to_one_identity() {
    let fs = MemoryFileSystem::new("/project")
        .with_file("src/pages/Home.tsx", r#"import Foo from "../components/Foo""#)
        .with_file("src/screens/Other.jsx", r#"const Foo = require("../components/Foo")"#);

    let report = scan(&fs, &no_allowlist()).unwrap();
    assert_eq!(report.statistics.referenced_identities, 1);
}

#[test]
fn repeated_scans_are_identical() {
    let fs = MemoryFileSystem::new("/project")
        .with_file("src/z/a.ts", "")
        .with_file("src/a/b.ts", "import x from '@/z/a';")
        .with_file("src/m/c.scss", "@import 'vars';")
        .with_file("README.md", "# readme");
    let options = ScanOptions::default();

    let first = scan(&fs, &options).unwrap();
    let second = scan(&fs, &options).unwrap();

    assert_eq!(first.findings, second.findings);
    assert_eq!(first.directories, second.directories);
    assert_eq!(
        serde_json::to_value(&first.findings).unwrap(),
        serde_json::to_value(&second.findings).unwrap()
    );
}

#[test]
fn directory_summaries_are_sorted_and_cover_intermediate_dirs() {
    let fs = MemoryFileSystem::new("/project")
        .with_file("package.json", "{}")
        .with_file("src/b/x.ts", "x")
        .with_file("src/a/y.ts", "y")
        .with_file("src/a/z.ts", "z");

    let report = scan(&fs, &no_allowlist()).unwrap();
    let dirs: Vec<_> = report.directories.iter().map(|d| d.path.as_str()).collect();

    assert_eq!(dirs, vec!["src", "src/a", "src/b"]);
    assert_eq!(report.directories[0].file_count, 0);
    assert_eq!(report.directories[0].total_bytes, 0);
    assert!(!report.directories[0].suspicious);
    assert_eq!(report.directories[1].file_count, 2);
    assert_eq!(report.directories[1].total_bytes, 2);
}

#[test]
fn scans_a_real_tree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir_all(root.join("src/pages")).unwrap();
    fs::create_dir_all(root.join("src/old")).unwrap();
    fs::create_dir_all(root.join("node_modules/left-pad")).unwrap();
    fs::write(
        root.join("src/pages/Home.tsx"),
        "import { Button } from '@/components/atoms/Button';\n\nexport default function Home() {\n  return <Button />;\n}\n",
    )
    .unwrap();
    for name in ["a.ts", "b.ts", "c.ts", "d.ts"] {
        fs::write(root.join("src/old").join(name), "   \n").unwrap();
    }
    fs::write(root.join("node_modules/left-pad/index.js"), "").unwrap();
    fs::write(root.join("src/logo.svg"), "<svg/>").unwrap();

    let native = NativeFileSystem::new(root).unwrap();
    let options = ScanOptions {
        known_used: KnownUsedSet::new(["src/pages", "src/lib/supabase.ts"]),
        ..Default::default()
    };

    let report = Scanner::new(options).unwrap().scan(&native).unwrap();

    assert_eq!(report.statistics.total_files, 6);
    assert_eq!(report.statistics.code_files, 5);
    assert_eq!(report.statistics.referenced_identities, 1);
    assert_eq!(suspicious(&report.findings), vec![("src/old", 4)]);
    assert!(report.findings.contains(&Finding::KnownPathPresent {
        path: "src/pages".to_string()
    }));
    assert!(report.findings.contains(&Finding::KnownPathMissing {
        path: "src/lib/supabase.ts".to_string()
    }));

    let svg = report
        .directories
        .iter()
        .flat_map(|d| d.sample.iter())
        .find(|r| r.name == "logo.svg")
        .unwrap();
    assert_eq!(svg.char_count, CharCount::NotApplicable);
}

#[test]
fn root_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("not-a-dir.ts");
    fs::write(&file, "").unwrap();

    let native = NativeFileSystem::new(&file).unwrap();
    let result = scan(&native, &no_allowlist());
    assert!(matches!(result, Err(Error::NotADirectory { .. })));
}

#[test]
fn unlistable_directory_is_recorded_and_scan_continues() {
    let fs = MemoryFileSystem::new("/project")
        .with_file("src/a.ts", "import b from './zz/b';")
        .with_walk_error("src/private", "Permission denied (os error 13)")
        .with_file("src/zz/b.ts", "");

    let report = scan(&fs, &no_allowlist()).unwrap();

    assert_eq!(report.statistics.total_files, 2);
    assert_eq!(report.statistics.referenced_identities, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].path, "src/private");
    assert_eq!(report.errors[0].severity, ErrorSeverity::Error);
    let dirs: Vec<_> = report.directories.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(dirs, vec!["src", "src/zz"]);
}

#[test]
fn zero_threshold_is_rejected() {
    let options = ScanOptions {
        small_file_threshold: 0,
        ..no_allowlist()
    };
    assert!(matches!(
        Scanner::new(options),
        Err(Error::InvalidConfig { .. })
    ));
}

#[cfg(unix)]
#[test]
fn dangling_symlink_allowlist_entry_is_missing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src/lib")).unwrap();
    std::os::unix::fs::symlink("nowhere.ts", root.join("src/lib/supabase.ts")).unwrap();

    let native = NativeFileSystem::new(root).unwrap();
    let options = ScanOptions {
        known_used: KnownUsedSet::new(["src/lib/supabase.ts"]),
        ..Default::default()
    };
    let report = scan(&native, &options).unwrap();

    assert_eq!(
        report.findings_of(FindingKind::KnownPaths).collect::<Vec<_>>(),
        vec![&Finding::KnownPathMissing {
            path: "src/lib/supabase.ts".to_string()
        }]
    );
}
