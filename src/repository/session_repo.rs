// ==========================================
// 经销商销售报表系统 - 会话仓储
// ==========================================
// 职责: 进程内会话登记表（句柄 → 不可变会话）
// 生命周期: 容量上限 + 最近最少使用淘汰 + 显式释放
// 红线: 会话本身只读，以 Arc 共享；锁只保护登记表
// 说明: 不做持久化；进程退出即丢弃
// ==========================================

use crate::domain::session::{Session, SessionId};
use crate::domain::table::RawTable;
use crate::engine::ingestion::ingest;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

struct SessionEntry {
    session: Arc<Session>,
    last_access: AtomicU64,
}

// ==========================================
// SessionRepository - 会话仓储
// ==========================================
pub struct SessionRepository {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    capacity: usize,
    clock: AtomicU64,
}

impl SessionRepository {
    /// 创建会话仓储
    ///
    /// # 参数
    /// - capacity: 最大会话数（至少为 1）
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
            clock: AtomicU64::new(0),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// 由原始表构建会话并登记
    pub fn ingest(&self, table: RawTable) -> RepositoryResult<(SessionId, Arc<Session>)> {
        self.insert(ingest(table))
    }

    /// 登记会话，返回新句柄
    ///
    /// 超出容量时淘汰最久未访问的会话。
    pub fn insert(&self, session: Session) -> RepositoryResult<(SessionId, Arc<Session>)> {
        let id = SessionId::generate();
        let session = Arc::new(session);
        let entry = SessionEntry {
            session: Arc::clone(&session),
            last_access: AtomicU64::new(self.tick()),
        };

        let mut sessions = self.sessions.write()?;
        while sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, e)| e.last_access.load(Ordering::Relaxed))
                .map(|(k, _)| k.clone());
            match oldest {
                Some(key) => {
                    sessions.remove(&key);
                    warn!(upload_id = %key, capacity = self.capacity, "会话数达到上限，淘汰最久未访问会话");
                }
                None => break,
            }
        }
        sessions.insert(id.clone(), entry);

        info!(upload_id = %id, rows = session.row_count(), active = sessions.len(), "会话已登记");
        Ok((id, session))
    }

    /// 按句柄获取会话
    pub fn get(&self, id: &SessionId) -> RepositoryResult<Arc<Session>> {
        let sessions = self.sessions.read()?;
        let entry = sessions
            .get(id)
            .ok_or_else(|| RepositoryError::SessionNotFound(id.to_string()))?;
        entry.last_access.store(self.tick(), Ordering::Relaxed);
        Ok(Arc::clone(&entry.session))
    }

    /// 显式释放会话
    ///
    /// # 返回
    /// - true: 已释放
    /// - false: 句柄不存在
    pub fn release(&self, id: &SessionId) -> RepositoryResult<bool> {
        let removed = self.sessions.write()?.remove(id).is_some();
        debug!(upload_id = %id, removed, "释放会话");
        Ok(removed)
    }

    pub fn contains(&self, id: &SessionId) -> RepositoryResult<bool> {
        Ok(self.sessions.read()?.contains_key(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawCell;

    fn table(dealer: &str) -> RawTable {
        RawTable::with_headers(&["Dealer Name"], vec![vec![RawCell::Text(dealer.to_string())]])
    }

    #[test]
    fn test_insert_and_get() {
        let repo = SessionRepository::new(4);
        let (id, session) = repo.ingest(table("Acme")).unwrap();

        let fetched = repo.get(&id).unwrap();
        assert!(Arc::ptr_eq(&session, &fetched));
        assert_eq!(id.as_str().len(), 32);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_unknown_handle_is_not_found() {
        let repo = SessionRepository::new(4);
        let err = repo.get(&SessionId::from("missing")).unwrap_err();
        assert!(matches!(err, RepositoryError::SessionNotFound(ref id) if id == "missing"));
    }

    #[test]
    fn test_release() {
        let repo = SessionRepository::new(4);
        let (id, _) = repo.ingest(table("Acme")).unwrap();
        assert!(repo.release(&id).unwrap());
        assert!(!repo.release(&id).unwrap());
        assert!(repo.get(&id).is_err());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let repo = SessionRepository::new(2);
        let (first, _) = repo.ingest(table("A")).unwrap();
        let (second, _) = repo.ingest(table("B")).unwrap();

        // 访问 first 使 second 成为最久未访问
        repo.get(&first).unwrap();
        let (third, _) = repo.ingest(table("C")).unwrap();

        assert_eq!(repo.len(), 2);
        assert!(repo.contains(&first).unwrap());
        assert!(!repo.contains(&second).unwrap());
        assert!(repo.contains(&third).unwrap());
    }

    #[test]
    fn test_evicted_session_stays_alive_for_holders() {
        let repo = SessionRepository::new(1);
        let (_, held) = repo.ingest(table("A")).unwrap();
        repo.ingest(table("B")).unwrap();
        assert_eq!(held.dealers(), ["A"]);
    }
}
