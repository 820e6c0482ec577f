// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Generated bindings for the Punks collection contract.
//!
//! The contract is an enumerable ERC-721 with a fixed-price `mint` and a
//! simplified owner-only `transfer`. Token metadata lives off-chain behind
//! the URI returned by `tokenURI`.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IPunks {
        event Minted(address indexed owner, uint256 tokenId);
        event Transferred(uint256 indexed tokenId, address indexed from, address indexed to);

        function balanceOf(address owner) external view returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
        function tokenURI(uint256 tokenId) external view returns (string memory);
        function mint() external payable;
        function transfer(uint256 tokenId, address to) external;
    }
}
