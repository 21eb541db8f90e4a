//! Hardhat artifact lookup and parsing

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{hex, primitives::Bytes};
use json::JsonValue;
use tracing::debug;

use crate::{errors::DeployError, utils::find_files};

/// The parts of a compiled contract needed to deploy it
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// Name recorded in the artifact
    pub contract_name: String,
    /// Creation bytecode, without constructor arguments
    pub bytecode: Bytes,
    /// Solidity types of the constructor inputs, in order
    pub constructor_inputs: Vec<String>,
}

/// Lookup of artifacts below a hardhat `artifacts/` directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// The `artifacts/` directory itself
    root: PathBuf,
}

impl ArtifactStore {
    /// Store rooted at a hardhat artifacts directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the artifact of `contract`, either a bare name or `path/To.sol:Name`
    pub fn load(&self, contract: &str) -> Result<ContractArtifact, DeployError> {
        let (path, name) = self.locate(contract)?;
        debug!(path = %path.display(), "Found artifact");

        let content = fs::read_to_string(&path)
            .map_err(|e| DeployError::Submission(format!("reading {}: {e}", path.display())))?;
        let parsed = json::parse(&content)
            .map_err(|e| DeployError::Submission(format!("parsing {}: {e}", path.display())))?;

        ContractArtifact::from_json(name, &parsed)
    }

    /// Path of the artifact file for `contract`, plus its bare contract name.
    ///
    /// A bare name matching more than one artifact is refused, the caller has
    /// to qualify it with its source file.
    fn locate<'a>(&self, contract: &'a str) -> Result<(PathBuf, &'a str), DeployError> {
        let not_found = || {
            DeployError::Submission(format!(
                "no artifact for contract `{contract}` under {}, was it compiled?",
                self.root.display()
            ))
        };

        if let Some((source, name)) = contract.rsplit_once(':') {
            let path = self.root.join(source).join(format!("{name}.json"));
            return if path.is_file() {
                Ok((path, name))
            } else {
                Err(not_found())
            };
        }

        let mut candidates = find_files(&self.root, &format!("{contract}.json"));
        match candidates.len() {
            0 => Err(not_found()),
            1 => Ok((candidates.remove(0), contract)),
            _ => {
                let names = candidates
                    .iter()
                    .map(|path| self.qualified_name(path, contract))
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(DeployError::Submission(format!(
                    "contract name `{contract}` is ambiguous, use one of: {names}"
                )))
            }
        }
    }

    /// `source.sol:Name` form of the artifact at `path`
    fn qualified_name(&self, path: &Path, contract: &str) -> String {
        let source = path
            .parent()
            .and_then(|dir| dir.strip_prefix(&self.root).ok())
            .unwrap_or(path);
        let source = source
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        format!("{source}:{contract}")
    }
}

impl ContractArtifact {
    /// Extract the deploy relevant parts of a hardhat artifact
    pub fn from_json(contract: &str, artifact: &JsonValue) -> Result<Self, DeployError> {
        let contract_name = artifact["contractName"].as_str().unwrap_or(contract).to_string();

        let raw_bytecode = artifact["bytecode"].as_str().ok_or_else(|| {
            DeployError::Submission(format!("artifact of `{contract_name}` has no bytecode"))
        })?;
        if raw_bytecode.trim_start_matches("0x").is_empty() {
            return Err(DeployError::Submission(format!(
                "`{contract_name}` has empty bytecode, is it abstract or an interface?"
            )));
        }
        // Unlinked libraries show up as `__$<hash>$__` placeholders
        if raw_bytecode.contains("__") {
            return Err(DeployError::Submission(format!(
                "`{contract_name}` bytecode has unlinked library references"
            )));
        }
        let bytecode = hex::decode(raw_bytecode)
            .map_err(|e| DeployError::Submission(format!("bad bytecode for `{contract_name}`: {e}")))?;

        let constructor_inputs = artifact["abi"]
            .members()
            .find(|item| item["type"] == "constructor")
            .map(|ctor| ctor["inputs"].members().map(abi_type).collect())
            .unwrap_or_default();

        Ok(Self {
            contract_name,
            bytecode: bytecode.into(),
            constructor_inputs,
        })
    }
}

/// Canonical type string of an ABI parameter, expanding tuples from their components
fn abi_type(param: &JsonValue) -> String {
    let ty = param["type"].as_str().unwrap_or_default();
    match ty.strip_prefix("tuple") {
        Some(suffix) => {
            let inner = param["components"].members().map(abi_type).collect::<Vec<_>>();
            format!("({}){suffix}", inner.join(","))
        }
        None => ty.to_string(),
    }
}
