// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_descriptor_is_not_found() {
    let guard = SecurityGuard::new();
    let err = guard
        .assert_capability(&AgentId::new("ghost"), Capability::ReadFs)
        .unwrap_err();
    assert!(matches!(err, SecurityError::NotFound(_)));
}

#[test]
fn missing_capability_is_denied() {
    let guard = SecurityGuard::new();
    guard.register(SecurityDescriptor::new("agent"));
    let err = guard
        .assert_capability(&AgentId::new("agent"), Capability::ReadFs)
        .unwrap_err();
    assert!(matches!(err, SecurityError::Denied { .. }));
}

#[test]
fn empty_allow_list_permits_any_path_with_capability() {
    let guard = SecurityGuard::new();
    guard.register(SecurityDescriptor::new("agent").with_capability(Capability::ReadFs));
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, b"hi").unwrap();
    guard.assert_fs_access(&AgentId::new("agent"), &file).unwrap();
}

#[test]
fn fs_allow_list_permits_paths_under_an_allowed_dir() {
    let guard = SecurityGuard::new();
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, b"hi").unwrap();
    guard.register(
        SecurityDescriptor::new("agent")
            .with_capability(Capability::ReadFs)
            .with_fs_allow_list(vec![dir.path().to_path_buf()]),
    );
    guard.assert_fs_access(&AgentId::new("agent"), &file).unwrap();
}

#[test]
fn fs_allow_list_denies_paths_outside_the_allowed_dir() {
    let guard = SecurityGuard::new();
    let dir = tempdir().unwrap();
    guard.register(
        SecurityDescriptor::new("agent")
            .with_capability(Capability::ReadFs)
            .with_fs_allow_list(vec![dir.path().to_path_buf()]),
    );
    let err = guard
        .assert_fs_access(&AgentId::new("agent"), Path::new("/etc/passwd"))
        .unwrap_err();
    assert!(matches!(err, SecurityError::Denied { .. }));
}

#[test]
fn exec_allow_list_requires_exact_match() {
    let guard = SecurityGuard::new();
    let dir = tempdir().unwrap();
    let allowed_bin = dir.path().join("allowed");
    let other_bin = dir.path().join("other");
    fs::write(&allowed_bin, b"").unwrap();
    fs::write(&other_bin, b"").unwrap();
    guard.register(
        SecurityDescriptor::new("agent")
            .with_capability(Capability::Exec)
            .with_exec_allow_list(vec![allowed_bin.clone()]),
    );
    guard.assert_exec(&AgentId::new("agent"), &allowed_bin).unwrap();
    let err = guard.assert_exec(&AgentId::new("agent"), &other_bin).unwrap_err();
    assert!(matches!(err, SecurityError::Denied { .. }));
}

#[test]
fn network_asserts_check_capability_and_gate() {
    let guard = SecurityGuard::new();
    guard.register(
        SecurityDescriptor::new("agent")
            .with_capability(Capability::NetOutbound)
            .allowing_network_outbound(),
    );
    guard.assert_network_outbound(&AgentId::new("agent")).unwrap();
    assert!(guard.assert_network_inbound(&AgentId::new("agent")).is_err());
}

#[test]
fn unregister_forgets_the_descriptor() {
    let guard = SecurityGuard::new();
    guard.register(SecurityDescriptor::new("agent"));
    assert!(guard.unregister(&AgentId::new("agent")));
    assert!(matches!(
        guard.assert_capability(&AgentId::new("agent"), Capability::ReadFs),
        Err(SecurityError::NotFound(_))
    ));
}
