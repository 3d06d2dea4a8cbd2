use crate::*;
use fp_types::crypto::Address;
use parking_lot::RwLock;
use std::sync::Arc;
use storage::db::MemDB;
use storage::state::{ChainState, State};

fn setup_temp_db() -> State<MemDB> {
    let chain_state = Arc::new(RwLock::new(ChainState::new(
        MemDB::new(),
        "temp_db".to_string(),
    )));
    State::new(chain_state)
}

#[test]
fn storage_value_works() {
    generate_storage!(Findora, Number => Value<u32>);

    assert_eq!(Number::module_prefix(), b"Findora");
    assert_eq!(Number::storage_prefix(), b"Number");
    assert_eq!(Number::store_key(), b"FindoraNumber".to_vec());

    let mut state = setup_temp_db();
    assert_eq!(Number::get_or_default(&state).unwrap(), 0);

    assert!(Number::put(&mut state, &10).is_ok());

    assert_eq!(Number::get(&state).unwrap(), Some(10));
    assert!(Number::exists(&state).unwrap());
    assert_eq!(Number::take(&mut state).unwrap(), Some(10));
    assert_eq!(Number::get(&state).unwrap(), None);
    assert!(!Number::exists(&state).unwrap());
}

#[test]
fn storage_map_test() {
    generate_storage!(Findora, Account => Map<String, u32>);

    assert_eq!(Account::module_prefix(), b"Findora");
    assert_eq!(Account::storage_prefix(), b"Account");

    let mut state = setup_temp_db();
    assert!(Account::insert(&mut state, &"a".to_string(), &10).is_ok());
    assert!(Account::insert(&mut state, &"b_1".to_string(), &20).is_ok());
    assert!(Account::insert(&mut state, &"c".to_string(), &30).is_ok());

    assert_eq!(Account::get(&state, &"a".to_string()).unwrap(), Some(10));
    assert!(Account::contains_key(&state, &"a".to_string()).unwrap());
    Account::remove(&mut state, &"a".to_string()).unwrap();
    assert_eq!(Account::get(&state, &"a".to_string()).unwrap(), None);
    assert!(!Account::contains_key(&state, &"a".to_string()).unwrap());

    let kvs = Account::iterate(&state).unwrap();
    assert_eq!(kvs, vec![("b_1".to_string(), 20), ("c".to_string(), 30)]);

    state.commit(1).unwrap();
    let kvs = Account::iterate(&state).unwrap();
    assert_eq!(kvs, vec![("b_1".to_string(), 20), ("c".to_string(), 30)]);
}

#[test]
fn storage_double_map_test() {
    generate_storage!(Findora, Data => DoubleMap<u64, u64, u32>);

    assert_eq!(Data::module_prefix(), b"Findora");
    assert_eq!(Data::storage_prefix(), b"Data");

    let mut state = setup_temp_db();
    assert!(Data::insert(&mut state, &1, &2, &10).is_ok());
    assert!(Data::insert(&mut state, &1, &10, &20).is_ok());
    assert!(Data::insert(&mut state, &2, &3, &30).is_ok());
    assert!(Data::insert(&mut state, &2, &4, &40).is_ok());
    assert!(Data::insert(&mut state, &11, &1, &50).is_ok());

    assert_eq!(Data::get(&state, &1, &2).unwrap(), Some(10));
    assert!(Data::contains_key(&state, &1, &2).unwrap());
    Data::remove(&mut state, &1, &2).unwrap();
    assert_eq!(Data::get(&state, &1, &2).unwrap(), None);
    assert!(!Data::contains_key(&state, &1, &2).unwrap());

    // key 1 must not match key 11
    let kvs = Data::iterate_prefix(&state, &1).unwrap();
    assert_eq!(kvs, vec![(10, 20)]);

    let kvs = Data::iterate_prefix(&state, &2).unwrap();
    assert_eq!(kvs, vec![(3, 30), (4, 40)]);

    state.commit(1).unwrap();
    Data::remove_prefix(&mut state, &2).unwrap();
    let kvs = Data::iterate_prefix(&state, &2).unwrap();
    assert_eq!(kvs, vec![]);

    let all = Data::iterate(&state).unwrap();
    assert_eq!(all, vec![(1, 10, 20), (11, 1, 50)]);
}

#[test]
fn storage_double_map_pair_key() {
    generate_storage!(Findora, Slash => DoubleMap<Address, (u64, u64), String>);

    let val = Address::from([9u8; 20]);
    let mut state = setup_temp_db();
    Slash::insert(&mut state, &val, &(12, 3), &"b".to_string()).unwrap();
    Slash::insert(&mut state, &val, &(9, 7), &"a".to_string()).unwrap();
    Slash::insert(&mut state, &val, &(12, 2), &"c".to_string()).unwrap();

    let kvs = Slash::iterate_prefix(&state, &val).unwrap();
    assert_eq!(
        kvs,
        vec![
            ((9, 7), "a".to_string()),
            ((12, 2), "c".to_string()),
            ((12, 3), "b".to_string()),
        ]
    );
}
