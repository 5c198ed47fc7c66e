//! In-memory entity store using DashMap
//!
//! Each entity family has its own map keyed by id plus an atomic counter,
//! so ids are unique and strictly increasing per family even under
//! concurrent requests. Listing collects and sorts by id, which is
//! insertion order. There are no transactions across families and
//! foreign-key references are stored without being checked.

use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use sinkedin_types::{Comment, Follow, Like, NewUser, Post, User};

struct Counters {
    user: AtomicI64,
    post: AtomicI64,
    comment: AtomicI64,
    like: AtomicI64,
    follow: AtomicI64,
}

impl Counters {
    fn new() -> Self {
        Self {
            user: AtomicI64::new(1),
            post: AtomicI64::new(1),
            comment: AtomicI64::new(1),
            like: AtomicI64::new(1),
            follow: AtomicI64::new(1),
        }
    }
}

fn next(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::Relaxed)
}

/// Process-wide entity store. Store operations never fail; absence is the
/// only structured signal (`Option::None`).
pub struct MemStore {
    users: DashMap<i64, User>,
    posts: DashMap<i64, Post>,
    comments: DashMap<i64, Comment>,
    likes: DashMap<i64, Like>,
    follows: DashMap<i64, Follow>,
    counters: Counters,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            posts: DashMap::new(),
            comments: DashMap::new(),
            likes: DashMap::new(),
            follows: DashMap::new(),
            counters: Counters::new(),
        }
    }

    // Users

    /// `new_user.password` must already be hashed; the store does not touch
    /// credentials.
    pub fn create_user(&self, new_user: NewUser) -> User {
        let id = next(&self.counters.user);
        let user = User {
            id,
            username: new_user.username,
            password: new_user.password,
            name: new_user.name,
            role: new_user.role,
            avatar: new_user.avatar,
            created_at: Utc::now(),
        };
        self.users.insert(id, user.clone());
        user
    }

    pub fn get_user(&self, id: i64) -> Option<User> {
        self.users.get(&id).map(|u| u.clone())
    }

    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.clone()).collect();
        users.sort_by_key(|u| u.id);
        users
    }

    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.clone())
    }

    // Posts

    pub fn create_post(&self, user_id: i64, content: String) -> Post {
        let id = next(&self.counters.post);
        let post = Post {
            id,
            user_id,
            content,
            created_at: Utc::now(),
        };
        self.posts.insert(id, post.clone());
        post
    }

    pub fn get_post(&self, id: i64) -> Option<Post> {
        self.posts.get(&id).map(|p| p.clone())
    }

    pub fn list_posts(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.iter().map(|p| p.clone()).collect();
        posts.sort_by_key(|p| p.id);
        posts
    }

    // Comments

    pub fn create_comment(&self, post_id: i64, user_id: i64, content: String) -> Comment {
        let id = next(&self.counters.comment);
        let comment = Comment {
            id,
            post_id,
            user_id,
            content,
            created_at: Utc::now(),
        };
        self.comments.insert(id, comment.clone());
        comment
    }

    pub fn list_comments(&self, post_id: i64) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| c.clone())
            .collect();
        comments.sort_by_key(|c| c.id);
        comments
    }

    // Likes

    /// One like per (post, user) pair: creating an existing pair returns
    /// the already-stored record instead of a duplicate.
    pub fn create_like(&self, post_id: i64, user_id: i64) -> Like {
        if let Some(existing) = self
            .likes
            .iter()
            .find(|l| l.post_id == post_id && l.user_id == user_id)
        {
            return existing.clone();
        }

        let id = next(&self.counters.like);
        let like = Like {
            id,
            post_id,
            user_id,
            created_at: Utc::now(),
        };
        self.likes.insert(id, like.clone());
        like
    }

    /// Removes the earliest like matching the pair; no-op if absent.
    pub fn delete_like(&self, post_id: i64, user_id: i64) {
        let target = self
            .likes
            .iter()
            .filter(|l| l.post_id == post_id && l.user_id == user_id)
            .map(|l| l.id)
            .min();
        if let Some(id) = target {
            self.likes.remove(&id);
        }
    }

    pub fn list_likes(&self, post_id: i64) -> Vec<Like> {
        let mut likes: Vec<Like> = self
            .likes
            .iter()
            .filter(|l| l.post_id == post_id)
            .map(|l| l.clone())
            .collect();
        likes.sort_by_key(|l| l.id);
        likes
    }

    // Follows

    pub fn create_follow(&self, follower_id: i64, following_id: i64) -> Follow {
        let id = next(&self.counters.follow);
        let follow = Follow {
            id,
            follower_id,
            following_id,
            created_at: Utc::now(),
        };
        self.follows.insert(id, follow.clone());
        follow
    }

    /// Removes the earliest follow matching the pair; no-op if absent.
    pub fn delete_follow(&self, follower_id: i64, following_id: i64) {
        let target = self
            .follows
            .iter()
            .filter(|f| f.follower_id == follower_id && f.following_id == following_id)
            .map(|f| f.id)
            .min();
        if let Some(id) = target {
            self.follows.remove(&id);
        }
    }

    /// Edges pointing at `user_id`.
    pub fn list_followers(&self, user_id: i64) -> Vec<Follow> {
        let mut follows: Vec<Follow> = self
            .follows
            .iter()
            .filter(|f| f.following_id == user_id)
            .map(|f| f.clone())
            .collect();
        follows.sort_by_key(|f| f.id);
        follows
    }

    /// Edges originating from `user_id`.
    pub fn list_following(&self, user_id: i64) -> Vec<Follow> {
        let mut follows: Vec<Follow> = self
            .follows
            .iter()
            .filter(|f| f.follower_id == user_id)
            .map(|f| f.clone())
            .collect();
        follows.sort_by_key(|f| f.id);
        follows
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}
