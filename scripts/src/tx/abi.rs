//! Constructor argument encoding

use alloy::{
    dyn_abi::{DynSolType, DynSolValue},
    primitives::Bytes,
};

use crate::{build::ContractArtifact, errors::DeployError};

/// Encode `args` against the constructor of `artifact`, returning the full creation code
pub fn encode_deploy_code(artifact: &ContractArtifact, args: &[String]) -> Result<Bytes, DeployError> {
    let inputs = &artifact.constructor_inputs;
    if inputs.len() != args.len() {
        return Err(DeployError::Submission(format!(
            "`{}` constructor takes {} argument(s), got {}",
            artifact.contract_name,
            inputs.len(),
            args.len()
        )));
    }

    let values = inputs
        .iter()
        .zip(args)
        .enumerate()
        .map(|(i, (ty, arg))| coerce_arg(i, ty, arg))
        .collect::<Result<Vec<_>, _>>()?;

    let mut code = artifact.bytecode.to_vec();
    if !values.is_empty() {
        code.extend(DynSolValue::Tuple(values).abi_encode_params());
    }

    Ok(code.into())
}

/// Parse a single constructor argument as the given solidity type
fn coerce_arg(index: usize, ty: &str, arg: &str) -> Result<DynSolValue, DeployError> {
    let sol_type = DynSolType::parse(ty)
        .map_err(|e| DeployError::Submission(format!("unsupported constructor type `{ty}`: {e}")))?;

    sol_type.coerce_str(arg).map_err(|e| {
        DeployError::Submission(format!("constructor argument #{index} `{arg}` is not a valid {ty}: {e}"))
    })
}
