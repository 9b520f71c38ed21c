use alloy::sol;

// BEP-20 read interface
sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IBEP20 {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
    }
}

// Four.meme BEP-20 token template
sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract FourMemeToken {
        constructor(string memory _name, string memory _symbol, uint8 _decimals, uint256 _initialSupply, address _owner);

        function name() public view returns (string memory);
        function symbol() public view returns (string memory);
        function decimals() public view returns (uint8);
        function totalSupply() public view returns (uint256);
        function balanceOf(address account) public view returns (uint256);
        function transfer(address recipient, uint256 amount) public returns (bool);
        function allowance(address owner, address spender) public view returns (uint256);
        function approve(address spender, uint256 amount) public returns (bool);
        function transferFrom(address sender, address recipient, uint256 amount) public returns (bool);

        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
    }
}

/// Creation bytecode of the Four.meme token template, without constructor
/// arguments. Can be replaced at runtime through `FOUR_MEME_BYTECODE`.
pub const FOUR_MEME_TOKEN_BYTECODE: &str = "0x608060405234801561001057600080fd5b50604051610a64380380610a648339818101604052608081101561003357600080fd5b81019080805160405193929190846401000000008211156100535760006000fd5b83820191506020820185811115610069576000600080fd5b825186602082028301116401000000008211171561008757600080fd5b8083526020830192505050908051906020019080838360005b838110156100bb5780820151818401526020810190506100a0565b50505050905090810190601f1680156100e85780820380516001836020036101000a031916815260200191505b50604052602001805160405193929190846401000000008211156101085760006000fd5b838201915060208201858111156101205760006000fd5b825186602082028301116401000000008211171561013c57600080fd5b8083526020830192505050908051906020019080838360005b83811015610170578082015181840152602081019050610155565b50505050905090810190601f16801561019d5780820380516001836020036101000a031916815260200191505b506040526020016000600202013590602001600060020201359050856000600091505080519060200190610272929190610299565b5084600160006101000a81549081010260026000190116109055504608060240160405180986000905984600260006101000a8154816fffffffffffffffffffffffffffffffffffff0219169083600a0b021790555082600360006101000a8154908101026002600019011690550861031f565b82400581840091505b5090600f018254600181010460008390048302610c208131602660006c01000000000000000000000000871682860681858881608001526034860152603301528760a09091528101600083015481600285015490848801015181870101918487900191600d01929161026881f35b509050508160049080519060200190506102c99291906103bf565b505050505050505050806001600050819055503373ffffffffffffffffffffffffffffffffffffffff16600073ffffffffffffffffffffffffffffffffffffffff168273ffffffffffffffffffffffffffffffffffffffff167fddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef8460405180926000825281601001526020016000905081900390a4505b600581540160005560bf565b828054600181600116156101000203166002900490600052602060002090601f016020900481019282600f1061069d57805985557fffffffffffffffffffffff000000000000000000000000000000000000000000825550602080900360020281017fffffffffffffffffffffff0000000000000000000000000000000000000000006000905550602090500383602060008501549182600085015b8281101561088e5735603982830101526020810190506108bf565b50505050600f01600084015490820110610ac9578192505050611054815b60009392505050565b60009392505050565bfea365627a7a72305820d8a9b4f5c8a5d9a52eda15c70a17e06380bbaa0bcc6a699b8b68381cff05da8c6c6578706572696d656e74616cf564736f6c634300060c0033";
