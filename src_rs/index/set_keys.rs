// 목적:
// - 피드가 읽는 정렬 집합 계열의 키 문자열을 만든다.
//
// 참조:
// - src_rs/core/set_selector.rs

use crate::core::descriptor::{Cid, Uid};

pub fn category_main(cid: Cid) -> String {
    format!("cid:{}:tids", cid)
}

pub fn category_by_posts(cid: Cid) -> String {
    format!("cid:{}:tids:posts", cid)
}

pub fn category_by_votes(cid: Cid) -> String {
    format!("cid:{}:tids:votes", cid)
}

pub fn category_by_user(cid: Cid, uid: Uid) -> String {
    format!("cid:{}:uid:{}:tids", cid, uid)
}

pub fn category_pinned(cid: Cid) -> String {
    format!("cid:{}:tids:pinned", cid)
}

pub fn category_children(cid: Cid) -> String {
    format!("cid:{}:children", cid)
}

pub fn tag_topics(tag: &str) -> String {
    format!("tag:{}:topics", tag)
}
