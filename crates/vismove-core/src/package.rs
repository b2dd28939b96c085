//! Deployed Move packages: module sources and a catalog of known packages.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::address::MoveAddress;
use crate::config::SuiNetwork;
use crate::error::Result;

/// Module name -> decompiled Move source.
pub type ModuleSources = BTreeMap<String, String>;

/// Fetches the source of every module in a published package.
#[async_trait]
pub trait PackageSource: Send + Sync {
    async fn package_modules(
        &self,
        package_id: &MoveAddress,
        network: SuiNetwork,
    ) -> Result<ModuleSources>;
}

pub type DynPackageSource = Arc<dyn PackageSource>;

static FUNCTION_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(?:public(?:\s*\(\s*(?:friend|package)\s*\))?|entry|native)\s+)*fun\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("function declaration pattern is valid")
});

/// Names of the functions declared in a module source, in declaration order.
///
/// Every visibility is listed (`public`, `public(friend)`, `public(package)`,
/// `entry`, private). Duplicates are kept out.
pub fn extract_functions(source: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for captures in FUNCTION_DECL.captures_iter(source) {
        let name = &captures[1];
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// A package users commonly want explained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownPackage {
    pub id: &'static str,
    pub name: &'static str,
}

/// Packages grouped by the protocol that deployed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DexInfo {
    pub name: &'static str,
    pub packages: Vec<KnownPackage>,
}

static KNOWN_PACKAGES: Lazy<Vec<DexInfo>> = Lazy::new(|| {
    vec![DexInfo {
        name: "Cetus",
        packages: vec![
            KnownPackage {
                id: "0x1eabed72c53feb3805120a081dc15963c204dc8d091542592abaf7a35689b2fb",
                name: "CLMM",
            },
            KnownPackage {
                id: "0x368d13376443a8051b22b42a9125f6a3bc836422bb2d9c4a53984b8d6624c326",
                name: "Aggregator V2",
            },
            KnownPackage {
                id: "0x43811be4677f5a5de7bf2dac740c10abddfaa524aee6b18e910eeadda8a2f6ae",
                name: "Aggregator V1",
            },
        ],
    }]
});

pub fn known_packages() -> &'static [DexInfo] {
    &KNOWN_PACKAGES
}

/// Looks up a known package by id.
pub fn find_known_package(package_id: &str) -> Option<(&'static DexInfo, &'static KnownPackage)> {
    known_packages().iter().find_map(|dex| {
        dex.packages
            .iter()
            .find(|package| package.id == package_id)
            .map(|package| (dex, package))
    })
}
