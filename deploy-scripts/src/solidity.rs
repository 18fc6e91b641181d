//! Definitions of the Solidity interfaces used during deployment

use alloy_sol_types::sol;

sol! {
    contract CurationManager {
        constructor(string title, address curationPass, uint256 curationLimit, bool isActive);
    }
}
