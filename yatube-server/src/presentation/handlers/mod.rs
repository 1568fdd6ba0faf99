use actix_web::web;

use crate::application::auth_service::AuthService;
use crate::application::comment_service::CommentService;
use crate::application::follow_service::FollowService;
use crate::application::group_service::GroupService;
use crate::application::post_service::PostService;
use crate::data::comment_repository::CommentRepository;
use crate::data::follow_repository::FollowRepository;
use crate::data::group_repository::GroupRepository;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;

pub mod auth;
pub mod follow;
pub mod group;
pub mod post;

pub type Auth = web::Data<AuthService<dyn UserRepository>>;
pub type Posts = web::Data<PostService<dyn PostRepository>>;
pub type Groups = web::Data<GroupService<dyn GroupRepository>>;
pub type Comments = web::Data<CommentService<dyn CommentRepository>>;
pub type Follows = web::Data<FollowService<dyn FollowRepository, dyn PostRepository>>;
